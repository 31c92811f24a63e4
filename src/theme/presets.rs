//! Built-in themes.

use crate::types::Color;

use super::{Theme, ThemeColors};

/// Names accepted by [`get_preset`].
pub fn preset_names() -> &'static [&'static str] {
    &["terminal", "dracula", "nord"]
}

/// Get a preset theme by name.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name {
        "terminal" => Some(terminal()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        _ => None,
    }
}

/// Terminal default theme - uses ANSI colors to respect the user's scheme.
pub fn terminal() -> Theme {
    Theme {
        name: "terminal".to_string(),
        colors: ThemeColors {
            header_fg: Color::Default,
            header_bg: Color::Default,
            text: Color::Default,
            background: Color::Default,
            muted: Color::GRAY,
            accent: Color::CYAN,
            border: Color::GRAY,
            footer_fg: Color::GRAY,
            footer_bg: Color::Default,
        },
    }
}

/// Dracula dark theme.
pub fn dracula() -> Theme {
    Theme {
        name: "dracula".to_string(),
        colors: ThemeColors {
            header_fg: Color::from_rgb_int(0xf8f8f2),
            header_bg: Color::from_rgb_int(0x44475a),
            text: Color::from_rgb_int(0xf8f8f2),
            background: Color::from_rgb_int(0x282a36),
            muted: Color::from_rgb_int(0x6272a4),
            accent: Color::from_rgb_int(0xbd93f9),
            border: Color::from_rgb_int(0x6272a4),
            footer_fg: Color::from_rgb_int(0x282a36),
            footer_bg: Color::from_rgb_int(0xbd93f9),
        },
    }
}

/// Nord arctic theme.
pub fn nord() -> Theme {
    Theme {
        name: "nord".to_string(),
        colors: ThemeColors {
            header_fg: Color::from_rgb_int(0xeceff4),
            header_bg: Color::from_rgb_int(0x3b4252),
            text: Color::from_rgb_int(0xd8dee9),
            background: Color::from_rgb_int(0x2e3440),
            muted: Color::from_rgb_int(0x4c566a),
            accent: Color::from_rgb_int(0x88c0d0),
            border: Color::from_rgb_int(0x4c566a),
            footer_fg: Color::from_rgb_int(0x2e3440),
            footer_bg: Color::from_rgb_int(0x88c0d0),
        },
    }
}
