//! Buffer and drawing primitives.
//!
//! A [`Buffer`] is a fixed-size grid of [`Cell`]s. Every operation that
//! takes a [`Point`] or [`Rect`] clips to the grid: writing partly or wholly
//! outside it is a no-op for the outside part, never an error.
//!
//! # Design Decisions
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing, `index = y * width + x`.
//! - **Wide characters**: a 2-wide glyph is followed by a continuation cell.
//!   Any write that lands on one half of a pair blanks the other half, so a
//!   row never holds a lead without its continuation or the reverse.
//! - **Reuse**: [`Buffer::reset`] resizes in place and keeps the allocation,
//!   which is what the [`BufferPool`](super::BufferPool) relies on.

use crate::layout::{char_width, string_width, strip_ansi, truncate_text, wrap_text};
use crate::types::{BorderStyle, Cell, Point, Rect, Size, Style, TextAlign};

use super::output::{StyleCache, serialize_rows};

/// Width used when a buffer is requested with a non-positive width.
pub const DEFAULT_WIDTH: u16 = 80;

/// Height used when a buffer is requested with a non-positive height.
pub const DEFAULT_HEIGHT: u16 = 24;

/// Suffix shown where text was cut to fit.
pub const ELLIPSIS: &str = "…";

/// Clamp a requested dimension: non-positive becomes `default`.
pub(crate) fn clamp_dim(value: i32, default: u16) -> u16 {
    if value <= 0 {
        default
    } else {
        value.min(i32::from(u16::MAX)) as u16
    }
}

/// Cell count of a buffer created with these dimensions.
pub(crate) fn clamped_area(width: i32, height: i32) -> usize {
    clamp_dim(width, DEFAULT_WIDTH) as usize * clamp_dim(height, DEFAULT_HEIGHT) as usize
}

// =============================================================================
// Buffer
// =============================================================================

/// A 2D grid of terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer.
    ///
    /// A non-positive width or height is replaced by [`DEFAULT_WIDTH`] or
    /// [`DEFAULT_HEIGHT`] respectively; dimensions above `u16::MAX` are capped.
    pub fn new(width: i32, height: i32) -> Self {
        let width = clamp_dim(width, DEFAULT_WIDTH);
        let height = clamp_dim(height, DEFAULT_HEIGHT);
        Self {
            width,
            height,
            cells: vec![Cell::blank(); width as usize * height as usize],
        }
    }

    /// Zero-cell stand-in left behind when a buffer is moved out of a guard.
    pub(crate) const fn detached() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The whole grid as a zero-origin rect.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.size())
    }

    /// Number of cells the backing storage can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cells.capacity()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width as usize + x
    }

    /// Check if a point addresses a cell in this buffer.
    #[inline]
    pub fn valid(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < i32::from(self.width) && p.y < i32::from(self.height)
    }

    /// Get a cell (returns None if out of bounds).
    #[inline]
    pub fn get(&self, p: Point) -> Option<&Cell> {
        if self.valid(p) {
            Some(&self.cells[self.index(p.x as usize, p.y as usize)])
        } else {
            None
        }
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    /// Resize to the given dimensions and blank all cells.
    ///
    /// Dimensions are clamped like [`Buffer::new`]. The backing storage is
    /// reused when it already has room for the new cell count.
    pub fn reset(&mut self, width: i32, height: i32) {
        self.width = clamp_dim(width, DEFAULT_WIDTH);
        self.height = clamp_dim(height, DEFAULT_HEIGHT);
        self.cells.clear();
        self.cells
            .resize(self.width as usize * self.height as usize, Cell::blank());
    }

    // =========================================================================
    // Wide-glyph bookkeeping
    // =========================================================================

    /// Blank the partner of a wide pair that has one half at `(x, y)`.
    ///
    /// Called before `(x, y)` is overwritten.
    fn unpair(&mut self, x: usize, y: usize) {
        let idx = self.index(x, y);
        let cell = self.cells[idx];
        if cell.is_continuation() && x > 0 {
            let lead = &mut self.cells[idx - 1];
            if lead.is_wide() {
                *lead = Cell::space(lead.style);
            }
        } else if cell.is_wide() && x + 1 < self.width as usize {
            let tail = &mut self.cells[idx + 1];
            if tail.is_continuation() {
                *tail = Cell::space(tail.style);
            }
        }
    }

    /// Write a cell whose position is known to be valid.
    ///
    /// A wide cell must have its continuation column in bounds.
    fn put(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.index(x, y);
        self.unpair(x, y);
        if cell.is_wide() {
            self.unpair(x + 1, y);
            self.cells[idx] = cell;
            self.cells[idx + 1] = Cell::continuation(cell.style);
        } else {
            self.cells[idx] = cell;
        }
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Write a single cell.
    ///
    /// The cell's width is recomputed from its glyph, so a hand-built cell
    /// can't disagree with [`char_width`]; control and zero-width glyphs are
    /// stored as spaces.
    ///
    /// Returns true if the cell was written. Continuation cells cannot be set
    /// directly, and a wide cell whose continuation column falls outside the
    /// buffer is rejected.
    pub fn set_cell(&mut self, p: Point, cell: Cell) -> bool {
        if !self.valid(p) || cell == Cell::continuation(cell.style) {
            return false;
        }

        let (x, y) = (p.x as usize, p.y as usize);
        let cell = Cell::new(cell.glyph, cell.style);
        if cell.is_wide() && x + 1 >= self.width as usize {
            return false;
        }

        self.put(x, y, cell);
        true
    }

    /// Fill the part of `rect` inside the buffer with `glyph` in `style`.
    ///
    /// A wide glyph is laid down in pairs; a leftover odd column gets a space.
    /// Zero-width glyphs fill with spaces.
    pub fn fill_rect(&mut self, rect: Rect, glyph: char, style: Style) {
        let Some(area) = rect.intersect(&self.bounds()) else {
            return;
        };
        let cell = Cell::new(glyph, style);
        let (x1, x2) = (area.x as usize, area.right() as usize);

        for y in area.y as usize..area.bottom() as usize {
            // Pairs straddling the left or right edge lose their outside half.
            self.unpair(x1, y);
            self.unpair(x2 - 1, y);

            if cell.is_wide() {
                let mut x = x1;
                while x + 2 <= x2 {
                    self.put(x, y, cell);
                    x += 2;
                }
                if x < x2 {
                    self.put(x, y, Cell::space(style));
                }
            } else {
                let start = self.index(x1, y);
                let end = self.index(x2, y);
                self.cells[start..end].fill(cell);
            }
        }
    }

    /// Write text on one row starting at `p`.
    ///
    /// Each char takes one or two columns. Zero-width chars and ANSI escape
    /// sequences are skipped; style comes only from `style`.
    /// Writing stops at the first glyph that would not fit before the right
    /// edge, so a wide glyph is never split; glyphs left of column 0 are
    /// skipped.
    ///
    /// Returns the number of columns consumed counting from `p.x`.
    pub fn write_string(&mut self, p: Point, text: &str, style: Style) -> usize {
        if p.y < 0 || p.y >= i32::from(self.height) {
            return 0;
        }

        let y = p.y as usize;
        let right = i64::from(self.width);
        let mut col = i64::from(p.x);

        let text = strip_ansi(text);
        for ch in text.chars() {
            let w = char_width(ch);
            if w == 0 {
                continue;
            }
            if col + w as i64 > right {
                break;
            }
            if col >= 0 {
                self.put(
                    col as usize,
                    y,
                    Cell {
                        glyph: ch,
                        width: w as u8,
                        style,
                    },
                );
            }
            col += w as i64;
        }

        (col - i64::from(p.x)).max(0) as usize
    }

    /// Word-wrap `text` into lines of at most `max_width` columns and write
    /// them on consecutive rows starting at `p`.
    ///
    /// A `max_width` of 0 means the width remaining from `p.x` to the right
    /// edge. Returns the number of lines the text wrapped to, including lines
    /// that fell below the buffer.
    pub fn write_string_wrapped(
        &mut self,
        p: Point,
        max_width: usize,
        text: &str,
        style: Style,
    ) -> usize {
        let Some(max_width) = self.effective_width(p, max_width) else {
            return 0;
        };

        let lines = wrap_text(text, max_width);
        for (row, line) in lines.iter().enumerate() {
            let row = i32::try_from(row).unwrap_or(i32::MAX);
            self.write_string(p.offset(0, row), line, style);
        }
        lines.len()
    }

    /// Write text cut to `max_width` columns, ending in `…` when cut.
    ///
    /// A `max_width` of 0 means the remaining row width.
    pub fn write_string_truncated(
        &mut self,
        p: Point,
        max_width: usize,
        text: &str,
        style: Style,
    ) -> usize {
        let Some(max_width) = self.effective_width(p, max_width) else {
            return 0;
        };
        let text = truncate_text(text, max_width, ELLIPSIS);
        self.write_string(p, &text, style)
    }

    /// Write text aligned within a field of `width` columns starting at `p`.
    ///
    /// Text wider than the field is truncated with `…` first.
    pub fn write_string_aligned(
        &mut self,
        p: Point,
        width: usize,
        text: &str,
        style: Style,
        align: TextAlign,
    ) -> usize {
        let text = truncate_text(text, width, ELLIPSIS);
        let slack = width.saturating_sub(string_width(&text));
        let offset = match align {
            TextAlign::Left => 0,
            TextAlign::Center => slack / 2,
            TextAlign::Right => slack,
        };
        let offset = i32::try_from(offset).unwrap_or(i32::MAX);
        self.write_string(p.offset(offset, 0), &text, style)
    }

    /// Resolve a "0 means the rest of the row" width.
    fn effective_width(&self, p: Point, max_width: usize) -> Option<usize> {
        if max_width > 0 {
            return Some(max_width);
        }
        let remaining = i64::from(self.width) - i64::from(p.x);
        (remaining > 0).then_some(remaining as usize)
    }

    /// Draw a box along the edges of `rect`.
    ///
    /// Rects narrower or shorter than 2 cells draw nothing.
    pub fn draw_border(&mut self, rect: Rect, border: BorderStyle, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }

        let g = border.glyphs();
        let (left, top) = (rect.x, rect.y);
        let (right, bottom) = (rect.right() - 1, rect.bottom() - 1);

        // Only walk the visible span of each edge.
        let x_span = left.saturating_add(1).max(0)..right.min(i32::from(self.width));
        let y_span = top.saturating_add(1).max(0)..bottom.min(i32::from(self.height));

        for x in x_span {
            self.set_cell(Point::new(x, top), Cell::new(g.horizontal, style));
            self.set_cell(Point::new(x, bottom), Cell::new(g.horizontal, style));
        }
        for y in y_span {
            self.set_cell(Point::new(left, y), Cell::new(g.vertical, style));
            self.set_cell(Point::new(right, y), Cell::new(g.vertical, style));
        }

        self.set_cell(Point::new(left, top), Cell::new(g.top_left, style));
        self.set_cell(Point::new(right, top), Cell::new(g.top_right, style));
        self.set_cell(Point::new(right, bottom), Cell::new(g.bottom_right, style));
        self.set_cell(Point::new(left, bottom), Cell::new(g.bottom_left, style));
    }

    // =========================================================================
    // Composition
    // =========================================================================

    /// Copy every cell of `source` into this buffer with its top-left corner
    /// at `origin`, clipped to this buffer.
    ///
    /// Cells are copied verbatim, continuation cells included. Where clipping
    /// cuts a wide pair in half, the surviving half becomes a space with the
    /// same style. Returns false, changing nothing, when there is no source.
    pub fn write_buffer<'a>(&mut self, origin: Point, source: impl Into<Option<&'a Buffer>>) -> bool {
        let Some(source) = source.into() else {
            return false;
        };

        let placed = Rect::new(
            origin.x,
            origin.y,
            i32::from(source.width),
            i32::from(source.height),
        );
        let Some(area) = placed.intersect(&self.bounds()) else {
            return true;
        };

        let (x1, x2) = (area.x as usize, area.right() as usize);
        let src_x = (area.x - origin.x) as usize;
        let len = x2 - x1;

        for y in area.y as usize..area.bottom() as usize {
            let src_y = (y as i32 - origin.y) as usize;
            let src_start = source.index(src_x, src_y);

            self.unpair(x1, y);
            self.unpair(x2 - 1, y);

            let dst_start = self.index(x1, y);
            self.cells[dst_start..dst_start + len]
                .copy_from_slice(&source.cells[src_start..src_start + len]);

            let first = &mut self.cells[dst_start];
            if first.is_continuation() {
                *first = Cell::space(first.style);
            }
            let last = &mut self.cells[dst_start + len - 1];
            if last.is_wide() {
                *last = Cell::space(last.style);
            }
        }
        true
    }

    // =========================================================================
    // Output
    // =========================================================================

    /// Serialize to a terminal string with a throwaway style cache.
    pub fn serialize(&self) -> String {
        self.serialize_with(&mut StyleCache::new())
    }

    /// Serialize to a terminal string, memoizing style prefixes in `cache`.
    ///
    /// Rows are joined with `\n` and each ends with a reset.
    pub fn serialize_with(&self, cache: &mut StyleCache) -> String {
        serialize_rows(
            self.rows()
                .map(|row| row.iter().map(|cell| (cell.glyph, cell.style))),
            cache,
        )
    }

    /// Rows as plain text, without styles or continuation cells.
    pub fn to_plain_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .filter(|cell| !cell.is_continuation())
                    .map(|cell| cell.glyph)
                    .collect()
            })
            .collect()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new(i32::from(DEFAULT_WIDTH), i32::from(DEFAULT_HEIGHT))
    }
}

// =============================================================================
// Tests
// =============================================================================
