//! Error types for gridframe.
//!
//! Rendering never fails: out-of-range writes clip and oversized text
//! truncates. Only turning user-supplied text (colors, theme files, layout
//! configuration) into values can go wrong, and those paths return
//! [`Result`].

use thiserror::Error;

/// Errors raised while parsing colors, themes and configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// A color string matched none of the supported spellings.
    ///
    /// Accepted forms are `default`, `#rgb`, `#rrggbb`, `ansi:N`, a bare
    /// palette index and the 16 ANSI color names.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// No built-in theme has this name.
    #[error("unknown theme preset: {0:?}")]
    UnknownPreset(String),

    /// TOML for a theme or layout configuration could not be decoded.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
