//! SGR (Select Graphic Rendition) escape sequences.
//!
//! A [`Style`] is always encoded as one self-contained sequence that starts
//! with a reset, so a prefix never depends on what was emitted before it.
//! That property is what lets the serializer cache prefixes by style value.

use std::fmt::{self, Write};

use crate::types::{Attr, Color, Style};

// =============================================================================
// Constants
// =============================================================================

/// Control Sequence Introducer.
pub const CSI: &str = "\x1b[";

/// Reset all attributes.
pub const RESET: &str = "\x1b[0m";

/// Attribute flags paired with their SGR codes, in emission order.
const ATTR_CODES: [(Attr, u8); 8] = [
    (Attr::BOLD, 1),
    (Attr::DIM, 2),
    (Attr::ITALIC, 3),
    (Attr::UNDERLINE, 4),
    (Attr::BLINK, 5),
    (Attr::INVERSE, 7),
    (Attr::HIDDEN, 8),
    (Attr::STRIKETHROUGH, 9),
];

// =============================================================================
// Parameters
// =============================================================================

/// Write `;`-prefixed SGR codes for every set attribute.
fn attr_params<W: Write>(w: &mut W, attrs: Attr) -> fmt::Result {
    for (flag, code) in ATTR_CODES {
        if attrs.contains(flag) {
            write!(w, ";{code}")?;
        }
    }
    Ok(())
}

/// Write the `;`-prefixed parameters selecting `color`.
///
/// `base` is 30 for foreground and 40 for background; bright colors and the
/// extended forms are derived from it.
fn color_params<W: Write>(w: &mut W, color: Color, base: u8) -> fmt::Result {
    match color {
        // Already implied by the leading reset.
        Color::Default => Ok(()),
        // Standard colors: 30-37 / 40-47
        Color::Indexed(i) if i < 8 => write!(w, ";{}", base + i),
        // Bright colors: 90-97 / 100-107
        Color::Indexed(i) if i < 16 => write!(w, ";{}", base + 60 + i - 8),
        // Extended palette: 38;5;n / 48;5;n
        Color::Indexed(i) => write!(w, ";{};5;{i}", base + 8),
        // TrueColor: 38;2;r;g;b / 48;2;r;g;b
        Color::Rgb(r, g, b) => write!(w, ";{};2;{r};{g};{b}", base + 8),
    }
}

// =============================================================================
// Style Sequences
// =============================================================================

/// Write the complete sequence that switches the terminal to `style`.
///
/// The plain style encodes as a bare reset (`ESC[0m`).
pub fn write_style<W: Write>(w: &mut W, style: &Style) -> fmt::Result {
    w.write_str(CSI)?;
    w.write_char('0')?;
    attr_params(w, style.attrs)?;
    color_params(w, style.fg, 30)?;
    color_params(w, style.bg, 40)?;
    w.write_char('m')
}

/// The sequence for `style` as an owned string.
pub fn style_sequence(style: &Style) -> String {
    let mut out = String::with_capacity(24);
    // Writing into a String cannot fail.
    let _ = write_style(&mut out, style);
    out
}
