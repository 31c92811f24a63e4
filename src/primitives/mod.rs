//! Drawable components.
//!
//! Anything that wants a region of the screen implements [`Renderable`] and
//! is registered with a [`LayoutManager`](crate::layout::LayoutManager).
//! The manager hands each component a private buffer and a zero-origin rect
//! covering it, so a component only ever sees its own coordinate space.
//!
//! Stock components:
//! - [`Text`] - wrapped, truncated or clipped text with alignment
//! - [`Fill`] - a solid glyph/style block
//! - [`ImagePlaceholder`] - a framed box reserving cells for an image
//!
//! # Example
//!
//! ```
//! use gridframe::primitives::{Renderable, Text};
//! use gridframe::renderer::Buffer;
//!
//! let text = Text::new("Hello, World!");
//! let mut buf = Buffer::new(20, 1);
//! let area = buf.bounds();
//! text.render(&mut buf, area);
//! assert_eq!(buf.to_plain_lines()[0].trim_end(), "Hello, World!");
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::renderer::Buffer;
use crate::types::{Rect, Size};

mod fill;
mod placeholder;
mod text;

pub use fill::Fill;
pub use placeholder::ImagePlaceholder;
pub use text::{Text, TextWrap};

// =============================================================================
// Renderable
// =============================================================================

/// The contract between a component and the layout that places it.
pub trait Renderable {
    /// Smallest area the component can draw anything useful in.
    fn min_size(&self) -> Size;

    /// Area the component would like if space allows.
    fn preferred_size(&self) -> Size;

    /// Draw into `area` of `buf`.
    ///
    /// Writes outside `area` are not policed, but every buffer primitive
    /// clips to the buffer, and the layout gives each component a buffer of
    /// exactly its own size.
    fn render(&self, buf: &mut Buffer, area: Rect);
}

impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn min_size(&self) -> Size {
        (**self).min_size()
    }

    fn preferred_size(&self) -> Size {
        (**self).preferred_size()
    }

    fn render(&self, buf: &mut Buffer, area: Rect) {
        (**self).render(buf, area);
    }
}

impl<T: Renderable + ?Sized> Renderable for Rc<T> {
    fn min_size(&self) -> Size {
        (**self).min_size()
    }

    fn preferred_size(&self) -> Size {
        (**self).preferred_size()
    }

    fn render(&self, buf: &mut Buffer, area: Rect) {
        (**self).render(buf, area);
    }
}

/// Lets a component keep mutable state that its owner updates between
/// frames while the layout holds a shared handle.
///
/// A component that is mutably borrowed at render time is skipped and
/// reports a zero size.
impl<T: Renderable + ?Sized> Renderable for RefCell<T> {
    fn min_size(&self) -> Size {
        self.try_borrow().map(|c| c.min_size()).unwrap_or_default()
    }

    fn preferred_size(&self) -> Size {
        self.try_borrow().map(|c| c.preferred_size()).unwrap_or_default()
    }

    fn render(&self, buf: &mut Buffer, area: Rect) {
        if let Ok(component) = self.try_borrow() {
            component.render(buf, area);
        }
    }
}

/// Saturating conversion for size math done in `usize`.
pub(crate) fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
