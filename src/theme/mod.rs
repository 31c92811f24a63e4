//! Color themes.
//!
//! A [`Theme`] is a named palette of semantic colors. Components never read
//! a global theme: callers resolve a [`Role`] to a [`Style`] and pass that
//! style to the component they build.
//!
//! # TOML Format
//!
//! Colors use any spelling [`Color::parse`] accepts. Omitted colors fall back
//! to the terminal defaults.
//!
//! ```toml
//! name = "midnight"
//!
//! [colors]
//! header_fg = "#e0e0ff"
//! header_bg = "ansi:17"
//! text = "default"
//! accent = "bright-cyan"
//! ```
//!
//! # Example
//!
//! ```rust
//! use gridframe::theme::{Role, Theme};
//!
//! let theme = Theme::from_preset("dracula").unwrap();
//! let header = theme.style(Role::Header);
//! assert!(header.attrs.contains(gridframe::Attr::BOLD));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{Attr, Color, Style};

mod presets;

pub use presets::{dracula, get_preset, nord, preset_names, terminal};

// =============================================================================
// Theme
// =============================================================================

/// A named palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub colors: ThemeColors,
}

/// Semantic colors, one per region or text role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeColors {
    pub header_fg: Color,
    pub header_bg: Color,
    /// Body text.
    pub text: Color,
    /// Body background.
    pub background: Color,
    /// Secondary text (hints, captions).
    pub muted: Color,
    /// Highlights and emphasis.
    pub accent: Color,
    pub border: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

/// What a piece of text is, for picking its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Header,
    Text,
    Muted,
    Accent,
    Border,
    Footer,
}

impl Theme {
    /// Look up a built-in theme.
    pub fn from_preset(name: &str) -> Result<Self> {
        get_preset(name).ok_or_else(|| Error::UnknownPreset(name.to_string()))
    }

    /// Parse a theme from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let theme: Self = toml::from_str(s)?;
        debug!(name = %theme.name, "loaded theme");
        Ok(theme)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// The style for text playing `role`.
    pub fn style(&self, role: Role) -> Style {
        let c = &self.colors;
        match role {
            Role::Header => Style::new()
                .fg(c.header_fg)
                .bg(c.header_bg)
                .attrs(Attr::BOLD),
            Role::Text => Style::new().fg(c.text).bg(c.background),
            Role::Muted => Style::new().fg(c.muted).bg(c.background).attrs(Attr::DIM),
            Role::Accent => Style::new().fg(c.accent).bg(c.background),
            Role::Border => Style::new().fg(c.border).bg(c.background),
            Role::Footer => Style::new().fg(c.footer_fg).bg(c.footer_bg),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_preset() {
        assert_eq!(Theme::from_preset("nord").unwrap().name, "nord");
        assert!(matches!(
            Theme::from_preset("solarized"),
            Err(Error::UnknownPreset(name)) if name == "solarized"
        ));
    }

    #[test]
    fn test_from_toml_partial_colors() {
        let theme = Theme::from_toml_str(
            r##"
            name = "custom"

            [colors]
            header_fg = "#ff0000"
            accent = "bright-cyan"
            header_bg = "ansi:17"
            "##,
        )
        .unwrap();

        assert_eq!(theme.name, "custom");
        assert_eq!(theme.colors.header_fg, Color::rgb(255, 0, 0));
        assert_eq!(theme.colors.header_bg, Color::Indexed(17));
        assert_eq!(theme.colors.accent, Color::Indexed(14));
        assert_eq!(theme.colors.text, Color::Default);
    }

    #[test]
    fn test_from_toml_without_colors_table() {
        let theme = Theme::from_toml_str(r#"name = "bare""#).unwrap();
        assert_eq!(theme.colors, ThemeColors::default());
    }

    #[test]
    fn test_from_toml_bad_color() {
        let err = Theme::from_toml_str(
            r#"
            name = "broken"
            [colors]
            text = "not-a-color"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn test_toml_round_trip() {
        let theme = dracula();
        let text = theme.to_toml_string().unwrap();
        assert_eq!(Theme::from_toml_str(&text).unwrap(), theme);
    }

    #[test]
    fn test_role_styles() {
        let theme = dracula();
        let header = theme.style(Role::Header);
        assert_eq!(header.fg, theme.colors.header_fg);
        assert!(header.attrs.contains(Attr::BOLD));
        assert!(theme.style(Role::Muted).attrs.contains(Attr::DIM));
        assert_eq!(theme.style(Role::Footer).bg, theme.colors.footer_bg);
    }
}
