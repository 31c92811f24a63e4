//! Greedy word wrapping.
//!
//! Lines break at UAX #29 word boundaries. A word wider than the line is
//! hard-broken between graphemes. Explicit `\n` always starts a new line.
//! ANSI escape sequences take no columns and are never split.

use unicode_segmentation::UnicodeSegmentation;

use super::ansi::{Piece, pieces};
use super::width::string_width;

/// Wrap text into lines no wider than `max_width` cells.
///
/// - Trailing whitespace is trimmed where a line is broken by wrapping.
/// - Leading whitespace is dropped at the start of a wrapped line, but kept
///   at the start of a line that follows an explicit newline.
/// - A grapheme wider than `max_width` on its own is dropped.
///
/// Returns an empty `Vec` for empty input. A `max_width` of 0 disables
/// wrapping and only splits on newlines.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if max_width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut lines = Vec::new();
    for raw_line in text.split('\n') {
        LineWrapper::new(max_width, &mut lines).wrap(raw_line);
    }
    lines
}

/// Number of lines `text` occupies when wrapped by [`wrap_text`].
pub fn measure_text_height(text: &str, max_width: usize) -> usize {
    wrap_text(text, max_width).len()
}

/// Wraps a single newline-free line into `lines`.
struct LineWrapper<'a> {
    max_width: usize,
    lines: &'a mut Vec<String>,
    current: String,
    width: usize,
    emitted: bool,
}

impl<'a> LineWrapper<'a> {
    fn new(max_width: usize, lines: &'a mut Vec<String>) -> Self {
        Self {
            max_width,
            lines,
            current: String::new(),
            width: 0,
            emitted: false,
        }
    }

    fn wrap(mut self, line: &str) {
        for piece in pieces(line) {
            match piece {
                // Zero columns; rides along with whatever line it lands on.
                Piece::Escape(seq) => self.current.push_str(seq),
                Piece::Text(run) => {
                    for segment in run.split_word_bounds() {
                        self.segment(segment);
                    }
                }
            }
        }

        // A blank source line still produces one (empty) line; a line that
        // ended in wrapped-away whitespace does not add another, and escapes
        // left after the last visible glyph stay on the last line.
        if self.width > 0 || !self.emitted {
            self.lines.push(self.current);
        } else if let Some(last) = self.lines.last_mut() {
            last.push_str(&self.current);
        }
    }

    fn segment(&mut self, segment: &str) {
        let seg_width = string_width(segment);

        if self.width + seg_width <= self.max_width {
            self.push(segment, seg_width);
            return;
        }

        if self.width > 0 {
            self.break_line();
        }
        if is_whitespace(segment) {
            return;
        }
        if seg_width > self.max_width {
            self.hard_break(segment);
        } else {
            self.push(segment, seg_width);
        }
    }

    fn push(&mut self, s: &str, width: usize) {
        // Whitespace left over from a wrap never starts a line.
        if self.width == 0 && self.emitted && is_whitespace(s) {
            return;
        }
        self.current.push_str(s);
        self.width += width;
    }

    fn break_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line.trim_end().to_string());
        self.width = 0;
        self.emitted = true;
    }

    fn hard_break(&mut self, segment: &str) {
        for grapheme in segment.graphemes(true) {
            let width = string_width(grapheme);
            if width > self.max_width {
                continue;
            }
            if self.width + width > self.max_width {
                self.break_line();
            }
            self.current.push_str(grapheme);
            self.width += width;
        }
    }
}

fn is_whitespace(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_empty() {
        assert!(wrap_text("", 10).is_empty());
        assert_eq!(measure_text_height("", 10), 0);
    }

    #[test]
    fn wrap_fits() {
        assert_eq!(wrap_text("hello world", 20), vec!["hello world"]);
        assert_eq!(wrap_text("hello", 5), vec!["hello"]);
    }

    #[test]
    fn wrap_at_word_boundary() {
        assert_eq!(wrap_text("hello world", 8), vec!["hello", "world"]);
        assert_eq!(wrap_text("one two three four", 9), vec!["one two", "three", "four"]);
    }

    #[test]
    fn wrap_long_word_hard_breaks() {
        assert_eq!(wrap_text("abcdefghij", 5), vec!["abcde", "fghij"]);
        assert_eq!(wrap_text("ab abcdefgh", 5), vec!["ab", "abcde", "fgh"]);
    }

    #[test]
    fn wrap_explicit_newlines() {
        assert_eq!(wrap_text("hello\nworld", 20), vec!["hello", "world"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("a\n  indented", 20), vec!["a", "  indented"]);
    }

    #[test]
    fn wrap_trailing_space_adds_no_line() {
        assert_eq!(wrap_text("hello ", 5), vec!["hello"]);
        assert_eq!(wrap_text("hello   world", 5), vec!["hello", "world"]);
    }

    #[test]
    fn wrap_cjk() {
        assert_eq!(wrap_text("你好世界", 5), vec!["你好", "世界"]);
        assert_eq!(wrap_text("hi你好", 5), vec!["hi你", "好"]);
    }

    #[test]
    fn wrap_keeps_escapes_whole_and_zero_width() {
        assert_eq!(
            wrap_text("\x1b[31mhello world\x1b[0m", 5),
            vec!["\x1b[31mhello", "world\x1b[0m"]
        );
        assert_eq!(wrap_text("hello \x1b[0m", 5), vec!["hello\x1b[0m"]);
        assert_eq!(measure_text_height("\x1b[1mhello world foo", 11), 2);
    }

    #[test]
    fn wrap_drops_glyph_wider_than_line() {
        assert_eq!(wrap_text("a你b", 1), vec!["a", "b"]);
    }

    #[test]
    fn wrap_width_zero_only_splits_newlines() {
        assert_eq!(wrap_text("hello world\nx", 0), vec!["hello world", "x"]);
    }

    #[test]
    fn wrapped_lines_never_exceed_width() {
        let text = "this is a very long text that needs wrapping";
        let lines = wrap_text(text, 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(string_width(line) <= 10, "{line:?}");
        }
        assert_eq!(measure_text_height(text, 10), lines.len());
    }
}
