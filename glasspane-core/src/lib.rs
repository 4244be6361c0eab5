//! # Glasspane Core
//!
//! State, theming and persistence core of the Glasspane start page.
//!
//! ## Overview
//!
//! - **Navigation**: the category tree, the active category/sub-category
//!   selection, the card list derived from it and the sliding tab highlight
//! - **Appearance**: dominant color extraction from image backgrounds, with a
//!   sequence guard so only the newest result is ever applied
//! - **Storage**: the async persistence contract plus in-memory and JSON file
//!   backends
//! - **Dashboard**: the single controller tying the above together and
//!   producing a serializable view for rendering layers
//! - **Search**: engine list and query dispatch URLs
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use glasspane_core::{
//!     appearance::AppearanceResolver,
//!     config::DashboardConfig,
//!     dashboard::Dashboard,
//!     storage::MemoryStorage,
//! };
//!
//! async fn render_once() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DashboardConfig::default();
//!     let resolver = AppearanceResolver::from_config(&config.appearance)?;
//!     let mut dashboard = Dashboard::from_config(
//!         &config,
//!         Arc::new(MemoryStorage::seeded()),
//!         resolver,
//!     );
//!
//!     dashboard.load().await;
//!     let view = dashboard.view()?;
//!     println!("{} cards under {:?}", view.items.len(), view.heading);
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod appearance;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod navigation;
pub mod search;
pub mod storage;

pub use error::{DashboardError, Result};

pub use glasspane_model as model;
