//! Text truncation with a configurable suffix.
//!
//! Cuts only at grapheme boundaries, so a wide glyph or a base character
//! with its combining marks is either kept whole or dropped whole. ANSI
//! escape sequences count as zero columns and are never cut in half.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{Piece, pieces};
use super::width::string_width;

/// Truncate text to fit within `max_width` terminal cells.
///
/// Text that already fits is returned unchanged. Otherwise the longest
/// grapheme prefix that leaves room for `suffix` is kept and `suffix` is
/// appended. When the suffix alone does not fit, the suffix itself is cut.
pub fn truncate_text(text: &str, max_width: usize, suffix: &str) -> String {
    if max_width == 0 {
        return String::new();
    }
    if string_width(text) <= max_width {
        return text.to_string();
    }

    let suffix_width = string_width(suffix);
    if suffix_width >= max_width {
        return take_width(suffix, max_width).to_string();
    }

    let mut out = take_width(text, max_width - suffix_width).to_string();
    out.push_str(suffix);
    out
}

/// Longest grapheme-aligned prefix of `text` no wider than `budget`.
///
/// Escape sequences inside the kept prefix are kept; they take no columns.
fn take_width(text: &str, budget: usize) -> &str {
    let mut used = 0;
    let mut end = 0;
    let mut start = 0;

    'pieces: for piece in pieces(text) {
        match piece {
            Piece::Escape(seq) => {
                start += seq.len();
                end = start;
            }
            Piece::Text(run) => {
                for (offset, grapheme) in run.grapheme_indices(true) {
                    let width = string_width(grapheme);
                    if used + width > budget {
                        break 'pieces;
                    }
                    used += width;
                    end = start + offset + grapheme.len();
                }
                start += run.len();
            }
        }
    }
    &text[..end]
}
