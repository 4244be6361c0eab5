//! Dominant color computation

use glasspane_model::HexColor;
use image::DynamicImage;

use super::{AppearanceError, Result};

/// Returned for images without a single opaque pixel
pub const FALLBACK_COLOR: HexColor = HexColor::from_rgb([128, 128, 128]);

/// Longest edge images are reduced to before sampling
pub const DEFAULT_SAMPLE_SIZE: u32 = 64;

/// Decode `data` and average its opaque pixels on the blocking pool
pub async fn dominant_color(data: Vec<u8>, sample_size: u32) -> Result<HexColor> {
    tokio::task::spawn_blocking(move || {
        let image = image::load_from_memory(&data)
            .map_err(|e| AppearanceError::Decode(e.to_string()))?;
        Ok(dominant_color_of(&image, sample_size))
    })
    .await
    .map_err(|e| AppearanceError::Processing(e.to_string()))?
}

/// Average color of every pixel with alpha above 128, sampled from a copy
/// reduced to fit within `sample_size` squared.
pub fn dominant_color_of(image: &DynamicImage, sample_size: u32) -> HexColor {
    let sample_size = sample_size.max(1);
    let reduced;
    let image = if image.width() > sample_size || image.height() > sample_size {
        reduced = image.thumbnail(sample_size, sample_size);
        &reduced
    } else {
        image
    };

    let rgba = image.to_rgba8();
    let (mut r_sum, mut g_sum, mut b_sum, mut count) = (0u64, 0u64, 0u64, 0u64);

    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        if a > 128 {
            r_sum += r as u64;
            g_sum += g as u64;
            b_sum += b as u64;
            count += 1;
        }
    }

    if count == 0 {
        return FALLBACK_COLOR;
    }

    HexColor::from_rgb([
        (r_sum / count) as u8,
        (g_sum / count) as u8,
        (b_sum / count) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgba, RgbaImage};

    use super::*;

    fn png_bytes(image: RgbaImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[tokio::test]
    async fn solid_image_yields_its_color() {
        let image = RgbaImage::from_pixel(200, 120, Rgba([200, 40, 90, 255]));
        let color = dominant_color(png_bytes(image), DEFAULT_SAMPLE_SIZE)
            .await
            .unwrap();
        assert_eq!(color.rgb(), [200, 40, 90]);
    }

    #[test]
    fn transparent_pixels_are_ignored() {
        let mut image = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 0]));
        image.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        image.put_pixel(1, 0, Rgba([30, 40, 50, 200]));
        // At the threshold, still ignored
        image.put_pixel(2, 0, Rgba([255, 255, 255, 128]));

        let color = dominant_color_of(&DynamicImage::ImageRgba8(image), 64);
        assert_eq!(color.rgb(), [20, 30, 40]);
    }

    #[test]
    fn fully_transparent_image_is_mid_gray() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([255, 0, 0, 0]));
        let color = dominant_color_of(&DynamicImage::ImageRgba8(image), 64);
        assert_eq!(color, FALLBACK_COLOR);
        assert_eq!(color.to_string(), "#808080");
    }

    #[test]
    fn halves_average_out() {
        let mut image = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        image.put_pixel(1, 0, Rgba([100, 200, 50, 255]));
        let color = dominant_color_of(&DynamicImage::ImageRgba8(image), 64);
        assert_eq!(color.rgb(), [50, 100, 25]);
    }

    #[tokio::test]
    async fn garbage_bytes_fail_to_decode() {
        let result = dominant_color(b"definitely not an image".to_vec(), 64).await;
        assert!(matches!(result, Err(AppearanceError::Decode(_))));
    }
}
