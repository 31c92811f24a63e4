//! ANSI escape sequence stripping.
//!
//! Handles:
//! - CSI sequences: `ESC [` ... final byte (0x40-0x7E)
//! - OSC sequences: `ESC ]` ... BEL or ST (`ESC \`)
//! - DCS/PM/APC sequences: `ESC P`/`ESC ^`/`ESC _` ... ST
//! - Two-character sequences: `ESC` + single byte

use std::borrow::Cow;

const ESC: u8 = 0x1B;
const BEL: u8 = 0x07;

/// A slice of text that is either one whole escape sequence or a run of
/// plain text containing no `ESC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece<'a> {
    Escape(&'a str),
    Text(&'a str),
}

/// Split `s` into alternating escape sequences and plain runs.
///
/// Every measuring and writing path tokenizes through here, so an escape
/// sequence is zero columns wide everywhere and never split.
pub(crate) fn pieces(s: &str) -> impl Iterator<Item = Piece<'_>> {
    let bytes = s.as_bytes();
    let mut i = 0;
    std::iter::from_fn(move || {
        if i >= bytes.len() {
            return None;
        }
        let start = i;
        if bytes[i] == ESC {
            i = sequence_end(bytes, i);
            Some(Piece::Escape(&s[start..i]))
        } else {
            // ESC is ASCII, so slicing at ESC positions stays on char boundaries.
            i = bytes[i..]
                .iter()
                .position(|&b| b == ESC)
                .map_or(bytes.len(), |n| i + n);
            Some(Piece::Text(&s[start..i]))
        }
    })
}

/// Strip ANSI escape sequences from a string.
///
/// Borrows when the input has no `ESC` byte.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.as_bytes().contains(&ESC) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        pieces(s)
            .filter_map(|piece| match piece {
                Piece::Text(text) => Some(text),
                Piece::Escape(_) => None,
            })
            .collect(),
    )
}

/// Index one past the escape sequence starting at `esc`.
fn sequence_end(bytes: &[u8], esc: usize) -> usize {
    let Some(&kind) = bytes.get(esc + 1) else {
        return bytes.len();
    };
    let body = esc + 2;

    match kind {
        b'[' => {
            for (offset, &b) in bytes[body..].iter().enumerate() {
                match b {
                    0x40..=0x7E => return body + offset + 1,
                    0x20..=0x3F => {}
                    // Malformed: resume at the offending byte.
                    _ => return body + offset,
                }
            }
            bytes.len()
        }
        b']' | b'P' | b'^' | b'_' => {
            let mut i = body;
            while i < bytes.len() {
                match bytes[i] {
                    BEL => return i + 1,
                    ESC if bytes.get(i + 1) == Some(&b'\\') => return i + 2,
                    _ => i += 1,
                }
            }
            bytes.len()
        }
        // Never consume half of a multibyte char.
        0x80.. => esc + 1,
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_escapes_borrows() {
        assert!(matches!(strip_ansi("hello"), Cow::Borrowed("hello")));
    }

    #[test]
    fn strips_sgr() {
        assert_eq!(strip_ansi("\x1b[31mred\x1b[0m"), "red");
        assert_eq!(strip_ansi("\x1b[0;1;38;2;255;0;0mX\x1b[0m"), "X");
    }

    #[test]
    fn strips_osc_hyperlink() {
        let link = "\x1b]8;;https://example.com\x07link\x1b]8;;\x1b\\";
        assert_eq!(strip_ansi(link), "link");
    }

    #[test]
    fn strips_two_byte_sequence() {
        assert_eq!(strip_ansi("a\x1b7b\x1b8c"), "abc");
    }

    #[test]
    fn keeps_multibyte_text() {
        assert_eq!(strip_ansi("\x1b[1m你好\x1b[0m世界"), "你好世界");
    }

    #[test]
    fn pieces_keep_sequences_whole() {
        let parts: Vec<Piece> = pieces("\x1b[31mred\x1b[0m 你").collect();
        assert_eq!(
            parts,
            vec![
                Piece::Escape("\x1b[31m"),
                Piece::Text("red"),
                Piece::Escape("\x1b[0m"),
                Piece::Text(" 你"),
            ]
        );
        assert_eq!(pieces("").count(), 0);
    }

    #[test]
    fn unterminated_sequence_consumes_rest() {
        assert_eq!(strip_ansi("ok\x1b[31"), "ok");
        assert_eq!(strip_ansi("ok\x1b"), "ok");
    }
}
