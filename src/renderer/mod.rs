//! Cell grid and output layer.
//!
//! The renderer knows only about cells. It doesn't understand components or
//! layout: it holds a [`Buffer`], offers the primitives that write into it,
//! and turns a finished buffer into a string of glyphs and SGR sequences.
//!
//! - [`buffer`] - the grid, its write/fill/compose primitives
//! - [`output`] - style-run serialization and the [`StyleCache`]
//! - [`ansi`] - SGR encoding of a [`Style`](crate::types::Style)
//! - [`pool`] - [`BufferPool`] for reusing grids between frames

pub mod ansi;
pub mod buffer;
pub mod output;
pub mod pool;

pub use buffer::{Buffer, DEFAULT_HEIGHT, DEFAULT_WIDTH, ELLIPSIS};
pub use output::{DEFAULT_STYLE_CACHE_LIMIT, StyleCache, serialize_rows, write_row};
pub use pool::{BufferPool, DEFAULT_POOL_CAPACITY, PoolStats, PooledBuffer};
