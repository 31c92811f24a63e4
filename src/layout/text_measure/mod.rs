//! Text measurement for cell-grid rendering.
//!
//! Every cell writer in the crate measures text through this module, so a
//! glyph reports the same width whether it is being measured, wrapped,
//! truncated or written into a [`Buffer`].
//!
//! # Capabilities
//!
//! - **Width calculation**: 0, 1 or 2 cells per codepoint
//! - **ANSI stripping**: CSI, OSC and string-terminated sequences are skipped
//! - **Word wrapping**: UAX #29 word boundaries with a hard-break fallback
//! - **Truncation**: grapheme-safe, with a configurable suffix
//!
//! [`Buffer`]: crate::renderer::Buffer

mod ansi;
mod truncate;
mod width;
mod wrap;

pub use ansi::strip_ansi;
pub(crate) use ansi::{Piece, pieces};
pub use truncate::truncate_text;
pub use width::{char_width, string_width};
pub use wrap::{measure_text_height, wrap_text};
