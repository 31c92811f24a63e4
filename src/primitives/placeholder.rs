//! Reserved space for an image.
//!
//! Bitmaps are drawn by a terminal image protocol outside this crate. What
//! the cell grid needs is the image's footprint in cells, so the layout can
//! size the content band from it and keep header and footer in place.

use crate::renderer::Buffer;
use crate::types::{BorderStyle, Point, Rect, Size, Style, TextAlign};

use super::Renderable;

/// A framed box standing in for an image of a known cell size.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePlaceholder {
    label: String,
    natural: Size,
    border: BorderStyle,
    style: Style,
}

impl ImagePlaceholder {
    /// `natural` is the image's display size in cells.
    pub fn new(label: impl Into<String>, natural: Size) -> Self {
        Self {
            label: label.into(),
            natural,
            border: BorderStyle::Rounded,
            style: Style::new(),
        }
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Rows the image wants, for [`LayoutManager::image_layout`].
    ///
    /// [`LayoutManager::image_layout`]: crate::layout::LayoutManager::image_layout
    pub fn content_height_hint(&self) -> i32 {
        i32::from(self.natural.height)
    }
}

impl Renderable for ImagePlaceholder {
    fn min_size(&self) -> Size {
        Size::new(2, 2)
    }

    fn preferred_size(&self) -> Size {
        self.natural
    }

    fn render(&self, buf: &mut Buffer, area: Rect) {
        if area.is_empty() {
            return;
        }
        buf.fill_rect(area, ' ', self.style);
        buf.draw_border(area, self.border, self.style);

        let inner = area.inset(1);
        if inner.is_empty() {
            return;
        }
        let middle = Point::new(inner.x, inner.y + (inner.height - 1) / 2);
        buf.write_string_aligned(
            middle,
            inner.width as usize,
            &self.label,
            self.style,
            TextAlign::Center,
        );
    }
}
