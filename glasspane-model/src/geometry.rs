//! Screen-space rectangles reported by the presentation layer.

/// Bounding rectangle of an on-screen element, in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Placement of the sliding pill behind the active navigation tab
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HighlightGeometry {
    /// Horizontal offset from the left edge of the tab track
    pub offset: f32,
    pub width: f32,
    /// False until the active tab has been measured at least once
    pub visible: bool,
}
