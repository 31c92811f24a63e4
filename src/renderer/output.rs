//! Style-run serialization.
//!
//! Turns rows of `(glyph, style)` pairs into a single string a terminal can
//! print. Within a row a style sequence is emitted only where the style
//! changes, so a run of identically styled cells costs one prefix. Every row
//! ends with a reset and rows are joined with `\n`.
//!
//! Prefixes are memoized per distinct [`Style`] in a [`StyleCache`], which
//! callers keep across frames.

use std::collections::HashMap;

use tracing::trace;

use crate::types::{CONTINUATION, Style};

use super::ansi;

// =============================================================================
// StyleCache
// =============================================================================

/// Distinct styles a [`StyleCache`] holds before it starts over.
pub const DEFAULT_STYLE_CACHE_LIMIT: usize = 1024;

/// Memoized escape prefixes keyed by style value.
///
/// Holds at most `limit` prefixes. A miss on a full cache drops every entry
/// before inserting. The hit and miss counters survive that reset.
#[derive(Debug)]
pub struct StyleCache {
    prefixes: HashMap<Style, String>,
    limit: usize,
    hits: u64,
    misses: u64,
}

impl Default for StyleCache {
    fn default() -> Self {
        Self::with_limit(DEFAULT_STYLE_CACHE_LIMIT)
    }
}

impl StyleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache holding at most `limit` distinct styles (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            prefixes: HashMap::new(),
            limit: limit.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// The escape prefix for `style`, encoding it on first use.
    pub fn prefix(&mut self, style: &Style) -> &str {
        if self.prefixes.contains_key(style) {
            self.hits += 1;
        } else {
            self.misses += 1;
            if self.prefixes.len() >= self.limit {
                trace!(limit = self.limit, "style cache full, clearing");
                self.prefixes.clear();
            }
        }
        self.prefixes
            .entry(*style)
            .or_insert_with(|| ansi::style_sequence(style))
    }

    /// Number of distinct styles encoded so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Lookups answered from the cache.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to encode a new style.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// Drop all cached prefixes and counters.
    pub fn clear(&mut self) {
        self.prefixes.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

// =============================================================================
// Serializer
// =============================================================================

/// Append one row to `out`, followed by a reset.
///
/// The terminal is assumed to be in the plain style at the start of the row,
/// so leading plain cells need no prefix. Continuation glyphs produce no
/// output.
pub fn write_row<I>(out: &mut String, row: I, cache: &mut StyleCache)
where
    I: IntoIterator<Item = (char, Style)>,
{
    let mut current = Style::new();
    for (glyph, style) in row {
        if glyph == CONTINUATION {
            continue;
        }
        if style != current {
            out.push_str(cache.prefix(&style));
            current = style;
        }
        out.push(glyph);
    }
    out.push_str(ansi::RESET);
}

/// Serialize rows of cells, joined by `\n` with no trailing newline.
pub fn serialize_rows<R, I>(rows: R, cache: &mut StyleCache) -> String
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = (char, Style)>,
{
    let mut out = String::new();
    for (y, row) in rows.into_iter().enumerate() {
        if y > 0 {
            out.push('\n');
        }
        write_row(&mut out, row, cache);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Color};

    fn row(text: &str, style: Style) -> Vec<(char, Style)> {
        text.chars().map(|c| (c, style)).collect()
    }

    #[test]
    fn test_plain_row_has_only_reset() {
        let mut cache = StyleCache::new();
        let out = serialize_rows([row("abc", Style::new())], &mut cache);
        assert_eq!(out, "abc\x1b[0m");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_run_emits_single_prefix() {
        let red = Style::new().fg(Color::RED);
        let mut cells = row("ab", red);
        cells.extend(row("cd", Style::new()));
        cells.extend(row("ef", red));

        let mut cache = StyleCache::new();
        let out = serialize_rows([cells], &mut cache);
        assert_eq!(out, "\x1b[0;31mab\x1b[0mcd\x1b[0;31mef\x1b[0m");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_rows_joined_without_trailing_newline() {
        let mut cache = StyleCache::new();
        let rows = [row("a", Style::new()), row("b", Style::new()), row("c", Style::new())];
        let out = serialize_rows(rows, &mut cache);
        assert_eq!(out, "a\x1b[0m\nb\x1b[0m\nc\x1b[0m");
        assert_eq!(out.matches('\n').count(), 2);
    }

    #[test]
    fn test_style_restarts_each_row() {
        let bold = Style::new().attrs(Attr::BOLD);
        let mut cache = StyleCache::new();
        let out = serialize_rows([row("x", bold), row("y", bold)], &mut cache);
        assert_eq!(out, "\x1b[0;1mx\x1b[0m\n\x1b[0;1my\x1b[0m");
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_continuation_skipped() {
        let mut cache = StyleCache::new();
        let cells = vec![('中', Style::new()), (CONTINUATION, Style::new()), ('a', Style::new())];
        let out = serialize_rows([cells], &mut cache);
        assert_eq!(out, "中a\x1b[0m");
    }

    #[test]
    fn test_empty_input() {
        let mut cache = StyleCache::new();
        let rows: Vec<Vec<(char, Style)>> = Vec::new();
        assert_eq!(serialize_rows(rows, &mut cache), "");
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = StyleCache::new();
        cache.prefix(&Style::new().bold());
        cache.prefix(&Style::new().bold());
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
    }

    #[test]
    fn test_cache_stays_within_limit() {
        let mut cache = StyleCache::with_limit(2);
        let styles = [
            Style::new().fg(Color::RED),
            Style::new().fg(Color::GREEN),
            Style::new().fg(Color::BLUE),
        ];
        for style in &styles {
            let expected = ansi::style_sequence(style);
            assert_eq!(cache.prefix(style), expected);
            assert!(cache.len() <= 2);
        }
        assert_eq!(cache.misses(), 3);

        // Gradient-style churn: every cell a new color.
        let mut cache = StyleCache::new();
        for i in 0..(DEFAULT_STYLE_CACHE_LIMIT as u32 + 100) {
            cache.prefix(&Style::new().fg(Color::rgb((i >> 16) as u8, (i >> 8) as u8, i as u8)));
        }
        assert!(cache.len() <= DEFAULT_STYLE_CACHE_LIMIT);
    }

    #[test]
    fn test_zero_limit_still_caches_one() {
        let mut cache = StyleCache::with_limit(0);
        cache.prefix(&Style::new().bold());
        cache.prefix(&Style::new().bold());
        assert_eq!((cache.hits(), cache.misses(), cache.len()), (1, 1, 1));
    }
}
