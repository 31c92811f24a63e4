//! Text component.
//!
//! Displays a string inside its area, one source line per row unless
//! wrapping is on. Overflow is handled by the [`TextWrap`] mode.

use crate::layout::{string_width, truncate_text, wrap_text};
use crate::renderer::Buffer;
use crate::types::{Point, Rect, Size, Style, TextAlign};

use super::{Renderable, to_u16};

/// How text that is wider than its area is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextWrap {
    /// Break at word boundaries onto following rows.
    #[default]
    Wrap,
    /// Cut at the right edge.
    NoWrap,
    /// Cut and end with `…`.
    Truncate,
}

/// A block of styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    content: String,
    style: Style,
    align: TextAlign,
    wrap: TextWrap,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: Style::new(),
            align: TextAlign::Left,
            wrap: TextWrap::Wrap,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn wrap(mut self, wrap: TextWrap) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Lines to draw for an area `width` columns wide.
    fn lines(&self, width: usize) -> Vec<String> {
        match self.wrap {
            TextWrap::Wrap => wrap_text(&self.content, width),
            TextWrap::NoWrap | TextWrap::Truncate => {
                self.content.split('\n').map(str::to_string).collect()
            }
        }
    }
}

impl Renderable for Text {
    fn min_size(&self) -> Size {
        if self.content.is_empty() {
            Size::default()
        } else {
            Size::new(1, 1)
        }
    }

    fn preferred_size(&self) -> Size {
        if self.content.is_empty() {
            return Size::default();
        }
        let lines: Vec<&str> = self.content.split('\n').collect();
        let width = lines.iter().map(|l| string_width(l)).max().unwrap_or(0);
        Size::new(to_u16(width), to_u16(lines.len()))
    }

    fn render(&self, buf: &mut Buffer, area: Rect) {
        if area.is_empty() {
            return;
        }
        let width = area.width as usize;

        for (row, line) in self.lines(width).iter().enumerate().take(area.height as usize) {
            let p = Point::new(area.x, area.y + row as i32);
            match self.wrap {
                // Alignment truncates with an ellipsis when the line is too wide.
                TextWrap::Wrap | TextWrap::Truncate => {
                    buf.write_string_aligned(p, width, line, self.style, self.align);
                }
                TextWrap::NoWrap => {
                    let clipped = truncate_text(line, width, "");
                    buf.write_string_aligned(p, width, &clipped, self.style, self.align);
                }
            }
        }
    }
}
