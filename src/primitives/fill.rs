//! Solid fill component.

use crate::renderer::Buffer;
use crate::types::{Rect, Size, Style};

use super::Renderable;

/// Covers its whole area with one glyph in one style.
///
/// Useful as a background band or a spacer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fill {
    glyph: char,
    style: Style,
}

impl Fill {
    pub fn new(glyph: char, style: Style) -> Self {
        Self { glyph, style }
    }

    /// Spaces in `style`, which shows only the background.
    pub fn background(style: Style) -> Self {
        Self::new(' ', style)
    }
}

impl Renderable for Fill {
    fn min_size(&self) -> Size {
        Size::default()
    }

    fn preferred_size(&self) -> Size {
        Size::default()
    }

    fn render(&self, buf: &mut Buffer, area: Rect) {
        buf.fill_rect(area, self.glyph, self.style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Point};

    #[test]
    fn test_fill_covers_area_only() {
        let style = Style::new().bg(Color::BLUE);
        let mut buf = Buffer::new(4, 3);
        Fill::background(style).render(&mut buf, Rect::new(1, 1, 2, 2));

        assert_eq!(buf.get(Point::new(1, 1)).map(|c| c.style), Some(style));
        assert_eq!(buf.get(Point::new(2, 2)).map(|c| c.style), Some(style));
        assert!(buf.get(Point::new(0, 0)).is_some_and(|c| c.is_blank()));
        assert!(buf.get(Point::new(3, 1)).is_some_and(|c| c.is_blank()));
    }
}
