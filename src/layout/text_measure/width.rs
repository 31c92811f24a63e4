//! Display width of characters and strings in terminal cells.
//!
//! Width is decided per codepoint because a cell holds exactly one
//! codepoint. A multi-codepoint grapheme (a ZWJ emoji family, a flag) is as
//! wide as the cells it will actually occupy once written.

use unicode_width::UnicodeWidthChar;

use super::ansi::strip_ansi;

/// Display width of a single codepoint in terminal cells.
///
/// - `0` for control characters, combining marks, zero-width characters
/// - `2` for East Asian Wide/Fullwidth and the common emoji blocks
/// - `1` for everything else
#[inline]
pub fn char_width(c: char) -> usize {
    if c.is_control() {
        return 0;
    }
    match c as u32 {
        // Misc symbols and dingbats (☀, ✨, ⚡)
        0x2600..=0x27BF => 2,
        // Pictographs and emoticons (🌍, 😀)
        0x1F300..=0x1F64F => 2,
        // Transport and map (🚀)
        0x1F680..=0x1F6FF => 2,
        // Supplemental symbols and pictographs
        0x1F900..=0x1F9FF => 2,
        // Symbols and pictographs extended-A
        0x1FA70..=0x1FAFF => 2,
        _ => c.width().unwrap_or(0),
    }
}

/// Display width of a string in terminal cells, ignoring ANSI escapes.
pub fn string_width(s: &str) -> usize {
    if s.is_empty() {
        return 0;
    }

    // Pure printable ASCII: one cell per byte.
    if s.is_ascii() && !s.as_bytes().contains(&0x1B) {
        return s.bytes().filter(|&b| (0x20..0x7F).contains(&b)).count();
    }

    strip_ansi(s).chars().map(char_width).sum()
}
