//! # gridframe
//!
//! Cell-grid rendering core for terminal UIs.
//!
//! gridframe computes exact cell geometry first and renders into it, instead
//! of rendering text and measuring the result. Everything is drawn into a
//! [`Buffer`]: a fixed grid of styled cells that knows about double-width
//! glyphs and clips every write to its bounds.
//!
//! ## Architecture
//!
//! ```text
//! LayoutManager::set_size → calculate_layout → render
//!     per component: pooled sub-buffer → Renderable::render → Buffer::write_buffer
//!     frame: Buffer::serialize_with(StyleCache) → String
//! ```
//!
//! The crate performs no terminal I/O. The host owns the event loop, calls
//! [`LayoutManager::set_size`] on resize and prints the string
//! [`LayoutManager::render`] returns.
//!
//! ## Modules
//!
//! - [`types`] - Core types (Color, Style, Cell, Point, Rect, etc.)
//! - [`renderer`] - Buffer, style-run serializer, buffer pool
//! - [`layout`] - Text measurement and the layout manager
//! - [`primitives`] - The `Renderable` contract and stock components
//! - [`theme`] - Palettes and TOML theme loading
//! - [`config`] - Layout configuration
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use gridframe::config::LayoutConfig;
//! use gridframe::layout::{CONTENT, FOOTER, HEADER, LayoutManager};
//! use gridframe::primitives::Text;
//!
//! let mut layout = LayoutManager::with_size(LayoutConfig::default(), 40, 6);
//! layout.add_component(HEADER, Rc::new(Text::new("gridframe")));
//! layout.add_component(CONTENT, Rc::new(Text::new("hello")));
//! layout.add_component(FOOTER, Rc::new(Text::new("q: quit")));
//! layout.calculate_layout();
//!
//! let frame = layout.render();
//! assert_eq!(frame.lines().count(), 6);
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod primitives;
pub mod renderer;
pub mod theme;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::LayoutConfig;
pub use error::{Error, Result};

pub use layout::{
    LayoutManager, LayoutState, char_width, measure_text_height, string_width, strip_ansi,
    truncate_text, wrap_text,
};

pub use primitives::{Fill, ImagePlaceholder, Renderable, Text, TextWrap};

pub use renderer::{Buffer, BufferPool, PoolStats, PooledBuffer, StyleCache};

pub use theme::{Role, Theme, ThemeColors};
