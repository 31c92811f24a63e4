//! Layout: text measurement and region assignment.
//!
//! Geometry is decided before anything is drawn. Text is measured in cells
//! with [`text_measure`], and the [`LayoutManager`] hands out rects for the
//! header, content and footer bands.
//!
//! # Example
//!
//! ```
//! use gridframe::layout::{CONTENT, LayoutManager};
//! use gridframe::config::LayoutConfig;
//! use gridframe::Rect;
//!
//! let mut layout = LayoutManager::with_size(LayoutConfig::default(), 80, 24);
//! layout.calculate_layout();
//! assert_eq!(layout.rect(CONTENT), Some(Rect::new(0, 1, 80, 22)));
//! ```

mod manager;
pub mod text_measure;

pub use manager::{CONTENT, FOOTER, HEADER, LayoutManager, LayoutState};
pub use text_measure::*;
