//! Region layout and component compositing.
//!
//! The [`LayoutManager`] splits the screen into named rects before anything
//! is drawn, then renders each registered component into a pooled buffer of
//! exactly its rect's size and copies that buffer into the frame. A
//! component can't draw outside its rect because it never sees the frame.
//!
//! # State
//!
//! ```text
//! Uninitialized --set_size--> Sized --calculate_layout/image_layout--> LaidOut --render--> Rendered
//!                               ^                                                              |
//!                               +---------------------- set_size (new size) -------------------+
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::LayoutConfig;
use crate::primitives::Renderable;
use crate::renderer::buffer::clamp_dim;
use crate::renderer::{Buffer, BufferPool, DEFAULT_HEIGHT, DEFAULT_WIDTH, StyleCache};
use crate::types::{Rect, Size};

/// Region id for the top band.
pub const HEADER: &str = "header";
/// Region id for the flexible middle band.
pub const CONTENT: &str = "content";
/// Region id for the bottom band.
pub const FOOTER: &str = "footer";

/// Where a [`LayoutManager`] is in its resize/layout/render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// No size yet; `render` produces nothing.
    Uninitialized,
    /// Sized, but rects may be stale.
    Sized,
    /// Rects computed for the current size.
    LaidOut,
    /// At least one frame produced since the last layout.
    Rendered,
}

/// Rows assigned to each band for one layout pass.
#[derive(Debug, Clone, Copy)]
struct Bands {
    header: i32,
    available: i32,
    footer: i32,
}

/// Owns the frame buffer, the region map and the registered components.
pub struct LayoutManager {
    width: u16,
    height: u16,
    config: LayoutConfig,
    state: LayoutState,
    main: Option<Buffer>,
    pool: Arc<BufferPool>,
    layout: HashMap<String, Rect>,
    components: Vec<(String, Rc<dyn Renderable>)>,
    styles: StyleCache,
}

impl LayoutManager {
    /// Create an unsized manager with its own buffer pool.
    pub fn new(config: LayoutConfig) -> Self {
        let pool = Arc::new(BufferPool::new(config.pool_capacity));
        Self::with_pool(config, pool)
    }

    /// Create an unsized manager that draws buffers from a shared pool.
    ///
    /// `config.pool_capacity` is ignored; the pool keeps its own bound.
    pub fn with_pool(config: LayoutConfig, pool: Arc<BufferPool>) -> Self {
        Self {
            width: 0,
            height: 0,
            config,
            state: LayoutState::Uninitialized,
            main: None,
            pool,
            layout: HashMap::new(),
            components: Vec::new(),
            styles: StyleCache::new(),
        }
    }

    /// Create a manager already sized to `width` x `height`.
    pub fn with_size(config: LayoutConfig, width: i32, height: i32) -> Self {
        let mut manager = Self::new(config);
        manager.set_size(width, height);
        manager
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    /// Style prefixes memoized across frames.
    pub fn style_cache(&self) -> &StyleCache {
        &self.styles
    }

    /// The rect assigned to `id`, if any.
    pub fn rect(&self, id: &str) -> Option<Rect> {
        self.layout.get(id).copied()
    }

    /// Registered component ids in render order.
    pub fn component_ids(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|(id, _)| id.as_str())
    }

    // =========================================================================
    // Sizing
    // =========================================================================

    /// Record the target size.
    ///
    /// Dimensions are clamped like [`Buffer::new`]. When the size changes the
    /// frame buffer is swapped for one of the new size and the manager goes
    /// back to [`LayoutState::Sized`]; rects are stale until the next
    /// [`calculate_layout`](Self::calculate_layout).
    pub fn set_size(&mut self, width: i32, height: i32) {
        let width = clamp_dim(width, DEFAULT_WIDTH);
        let height = clamp_dim(height, DEFAULT_HEIGHT);

        let unchanged = (width, height) == (self.width, self.height);
        if unchanged && self.state != LayoutState::Uninitialized {
            return;
        }

        debug!(width, height, "resize");
        if let Some(old) = self.main.take() {
            self.pool.release(old);
        }
        self.main = Some(self.pool.acquire(i32::from(width), i32::from(height)));
        self.width = width;
        self.height = height;
        self.state = LayoutState::Sized;
    }

    /// Change the header height. Takes effect at the next layout pass.
    pub fn set_header_height(&mut self, rows: u16) {
        self.config.header_height = rows;
        self.mark_stale();
    }

    /// Change the footer height. Takes effect at the next layout pass.
    pub fn set_footer_height(&mut self, rows: u16) {
        self.config.footer_height = rows;
        self.mark_stale();
    }

    fn mark_stale(&mut self) {
        if self.state != LayoutState::Uninitialized {
            self.state = LayoutState::Sized;
        }
    }

    // =========================================================================
    // Layout
    // =========================================================================

    fn bands(&self) -> Bands {
        let header = i32::from(self.config.header_height);
        let footer = i32::from(self.config.footer_height);
        let available = (i32::from(self.height) - header - footer).max(0);
        Bands {
            header,
            available,
            footer,
        }
    }

    fn assign_bands(&mut self, bands: Bands, content: Rect) {
        let width = i32::from(self.width);
        let header = Rect::new(0, 0, width, bands.header);
        let footer = Rect::new(0, bands.header + bands.available, width, bands.footer);

        self.layout.insert(HEADER.to_string(), header);
        self.layout.insert(CONTENT.to_string(), content);
        self.layout.insert(FOOTER.to_string(), footer);
        self.state = LayoutState::LaidOut;

        debug!(?header, ?content, ?footer, "layout computed");
    }

    /// Assign the three fixed regions.
    ///
    /// Header takes the top `header_height` rows, footer the bottom
    /// `footer_height` rows, and content everything between. When the two
    /// fixed bands don't leave room, content gets zero rows.
    pub fn calculate_layout(&mut self) {
        if self.state == LayoutState::Uninitialized {
            debug!("layout requested before set_size");
            return;
        }
        let bands = self.bands();
        let content = Rect::new(0, bands.header, i32::from(self.width), bands.available);
        self.assign_bands(bands, content);
    }

    /// Assign the three regions with content sized from a height hint.
    ///
    /// A positive `content_height_hint` caps the content rect at that many
    /// rows and centers it vertically in the band between header and footer;
    /// any other hint gives content the whole band. Header and footer are
    /// placed exactly as in [`calculate_layout`](Self::calculate_layout).
    pub fn image_layout(&mut self, content_height_hint: i32) {
        if self.state == LayoutState::Uninitialized {
            debug!("layout requested before set_size");
            return;
        }
        let bands = self.bands();
        let height = if content_height_hint > 0 {
            content_height_hint.min(bands.available)
        } else {
            bands.available
        };
        let top_pad = (bands.available - height) / 2;
        let content = Rect::new(0, bands.header + top_pad, i32::from(self.width), height);
        self.assign_bands(bands, content);
    }

    /// Assign `rect` to `id`, replacing any previous rect.
    pub fn set_layout(&mut self, id: impl Into<String>, rect: Rect) {
        self.layout.insert(id.into(), rect);
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Register a component under `id`.
    ///
    /// Re-registering an id replaces the component and keeps its place in
    /// the render order.
    pub fn add_component(&mut self, id: impl Into<String>, component: Rc<dyn Renderable>) {
        let id = id.into();
        match self.components.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = component,
            None => self.components.push((id, component)),
        }
    }

    /// Unregister `id` and forget its rect. Returns whether it was registered.
    pub fn remove_component(&mut self, id: &str) -> bool {
        self.layout.remove(id);
        let before = self.components.len();
        self.components.retain(|(existing, _)| existing != id);
        self.components.len() != before
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render one frame.
    ///
    /// Every component whose rect overlaps the screen draws into a pooled
    /// buffer of that rect's size, at a zero origin; the buffer is then copied
    /// into the frame at the rect's position. A rect that hangs off the
    /// screen gets a buffer of only its visible part, and the area handed to
    /// the component is offset so the visible part starts at the buffer's
    /// origin. Components without a rect, with an empty rect or with a rect
    /// entirely off-screen are skipped.
    ///
    /// Returns the serialized frame, or an empty string before the first
    /// [`set_size`](Self::set_size).
    pub fn render(&mut self) -> String {
        if self.state == LayoutState::Uninitialized {
            return String::new();
        }

        let (width, height) = (i32::from(self.width), i32::from(self.height));
        let mut frame = self
            .main
            .take()
            .unwrap_or_else(|| self.pool.acquire(width, height));

        for (id, component) in &self.components {
            let Some(rect) = self.layout.get(id) else {
                continue;
            };
            // Empty or entirely off-screen rects draw nothing.
            let Some(visible) = rect.intersect(&frame.bounds()) else {
                continue;
            };
            trace!(id = %id, ?rect, ?visible, "render component");

            // The sub-buffer covers only the visible part. The area keeps the
            // rect's full size, shifted so its on-screen part lands at (0, 0).
            let area = Rect::new(
                rect.x - visible.x,
                rect.y - visible.y,
                rect.width,
                rect.height,
            );
            let mut sub = self.pool.checkout(visible.width, visible.height);
            component.render(&mut sub, area);
            frame.write_buffer(visible.origin(), &*sub);
        }

        let out = frame.serialize_with(&mut self.styles);
        self.pool.release(frame);
        self.state = LayoutState::Rendered;
        out
    }
}

impl fmt::Debug for LayoutManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutManager")
            .field("size", &self.size())
            .field("state", &self.state)
            .field("config", &self.config)
            .field("layout", &self.layout)
            .field("components", &self.component_ids().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Default for LayoutManager {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{Fill, Text};
    use crate::types::Style;
    use std::cell::RefCell;

    fn manager(width: i32, height: i32, header: u16, footer: u16) -> LayoutManager {
        let config = LayoutConfig::default().header_height(header).footer_height(footer);
        LayoutManager::with_size(config, width, height)
    }

    /// Draws outside its area on purpose.
    struct Overflowing;

    impl Renderable for Overflowing {
        fn min_size(&self) -> Size {
            Size::default()
        }

        fn preferred_size(&self) -> Size {
            Size::default()
        }

        fn render(&self, buf: &mut Buffer, area: Rect) {
            buf.fill_rect(Rect::new(-5, -5, area.width + 10, area.height + 10), '!', Style::new());
        }
    }

    #[test]
    fn test_state_machine() {
        let mut lm = LayoutManager::default();
        assert_eq!(lm.state(), LayoutState::Uninitialized);
        assert_eq!(lm.render(), "");

        lm.calculate_layout();
        assert_eq!(lm.state(), LayoutState::Uninitialized);

        lm.set_size(40, 10);
        assert_eq!(lm.state(), LayoutState::Sized);
        lm.calculate_layout();
        assert_eq!(lm.state(), LayoutState::LaidOut);
        lm.render();
        assert_eq!(lm.state(), LayoutState::Rendered);

        // Same size is not a resize
        lm.set_size(40, 10);
        assert_eq!(lm.state(), LayoutState::Rendered);

        lm.set_size(50, 10);
        assert_eq!(lm.state(), LayoutState::Sized);
        assert_eq!(lm.size(), Size::new(50, 10));
    }

    #[test]
    fn test_calculate_layout_three_bands() {
        let mut lm = manager(80, 24, 5, 1);
        lm.calculate_layout();
        assert_eq!(lm.rect(HEADER), Some(Rect::new(0, 0, 80, 5)));
        assert_eq!(lm.rect(CONTENT), Some(Rect::new(0, 5, 80, 18)));
        assert_eq!(lm.rect(FOOTER), Some(Rect::new(0, 23, 80, 1)));
    }

    #[test]
    fn test_content_clamped_to_zero() {
        let mut lm = manager(20, 4, 3, 2);
        lm.calculate_layout();
        assert_eq!(lm.rect(CONTENT).map(|r| r.height), Some(0));
        assert_eq!(lm.rect(HEADER), Some(Rect::new(0, 0, 20, 3)));
        assert_eq!(lm.rect(FOOTER), Some(Rect::new(0, 3, 20, 2)));
    }

    #[test]
    fn test_image_layout_centers_content() {
        let mut lm = manager(80, 24, 2, 1);
        lm.image_layout(10);
        // 21 rows available, 11 spare: 5 above, 6 below
        assert_eq!(lm.rect(CONTENT), Some(Rect::new(0, 7, 80, 10)));
        assert_eq!(lm.rect(HEADER), Some(Rect::new(0, 0, 80, 2)));
        assert_eq!(lm.rect(FOOTER), Some(Rect::new(0, 23, 80, 1)));
    }

    #[test]
    fn test_image_layout_oversized_and_missing_hint() {
        let mut lm = manager(80, 24, 2, 1);
        lm.image_layout(100);
        assert_eq!(lm.rect(CONTENT), Some(Rect::new(0, 2, 80, 21)));
        lm.image_layout(0);
        assert_eq!(lm.rect(CONTENT), Some(Rect::new(0, 2, 80, 21)));
        lm.image_layout(-4);
        assert_eq!(lm.rect(CONTENT), Some(Rect::new(0, 2, 80, 21)));
        assert_eq!(lm.rect(FOOTER), Some(Rect::new(0, 23, 80, 1)));
    }

    #[test]
    fn test_header_height_change_marks_stale() {
        let mut lm = manager(80, 24, 1, 1);
        lm.calculate_layout();
        lm.set_header_height(3);
        assert_eq!(lm.state(), LayoutState::Sized);
        lm.calculate_layout();
        assert_eq!(lm.rect(CONTENT), Some(Rect::new(0, 3, 80, 20)));
    }

    #[test]
    fn test_render_composites_regions() {
        let mut lm = manager(10, 4, 1, 1);
        lm.add_component(HEADER, Rc::new(Text::new("title")));
        lm.add_component(CONTENT, Rc::new(Text::new("body text")));
        lm.add_component(FOOTER, Rc::new(Text::new("q: quit")));
        lm.calculate_layout();

        let out = lm.render();
        assert_eq!(out.matches('\n').count(), 3);
        let plain: Vec<String> = out
            .split('\n')
            .map(|row| crate::layout::strip_ansi(row).trim_end().to_string())
            .collect();
        assert_eq!(plain, vec!["title", "body text", "", "q: quit"]);
    }

    #[test]
    fn test_component_cannot_escape_rect() {
        let mut lm = manager(6, 3, 1, 1);
        lm.add_component(CONTENT, Rc::new(Overflowing));
        lm.calculate_layout();
        let out = lm.render();
        let rows: Vec<String> = out
            .split('\n')
            .map(|row| crate::layout::strip_ansi(row).into_owned())
            .collect();
        assert_eq!(rows, vec!["      ", "!!!!!!", "      "]);
    }

    #[test]
    fn test_components_without_rect_or_empty_rect_skipped() {
        let mut lm = manager(6, 3, 1, 1);
        lm.add_component("sidebar", Rc::new(Fill::new('x', Style::new())));
        lm.add_component(CONTENT, Rc::new(Fill::new('y', Style::new())));
        lm.set_layout(CONTENT, Rect::new(0, 1, 0, 1));
        let out = crate::layout::strip_ansi(&lm.render()).into_owned();
        assert!(!out.contains('x'));
        assert!(!out.contains('y'));
    }

    #[test]
    fn test_offscreen_and_oversized_rects_stay_bounded() {
        let mut lm = manager(6, 3, 0, 0);
        lm.add_component("huge", Rc::new(Fill::new('b', Style::new())));
        lm.add_component("offscreen", Rc::new(Fill::new('x', Style::new())));
        lm.add_component("shifted", Rc::new(Text::new("abcdef")));
        lm.set_layout("huge", Rect::new(0, 0, 60_000, 60_000));
        lm.set_layout("offscreen", Rect::new(10_000, 0, 5, 5));
        lm.set_layout("shifted", Rect::new(-2, 1, 6, 1));

        let out = crate::layout::strip_ansi(&lm.render()).into_owned();
        assert_eq!(out, "bbbbbb\ncdefbb\nbbbbbb");
        assert!(!out.contains('x'));
    }

    #[test]
    fn test_set_layout_custom_rect() {
        let mut lm = manager(6, 2, 0, 0);
        lm.add_component("badge", Rc::new(Fill::new('#', Style::new())));
        lm.set_layout("badge", Rect::new(4, 1, 5, 5));
        let out = crate::layout::strip_ansi(&lm.render()).into_owned();
        assert_eq!(out, "      \n    ##");
    }

    #[test]
    fn test_readd_replaces_in_place() {
        let mut lm = manager(6, 3, 1, 1);
        lm.add_component("a", Rc::new(Fill::new('1', Style::new())));
        lm.add_component("b", Rc::new(Fill::new('2', Style::new())));
        lm.add_component("a", Rc::new(Fill::new('3', Style::new())));
        assert_eq!(lm.component_ids().collect::<Vec<_>>(), vec!["a", "b"]);

        assert!(lm.remove_component("a"));
        assert!(!lm.remove_component("a"));
        assert_eq!(lm.component_ids().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_external_state_visible_next_frame() {
        let text = Rc::new(RefCell::new(Text::new("one")));
        let mut lm = manager(5, 1, 0, 0);
        lm.add_component(CONTENT, text.clone());
        lm.calculate_layout();
        assert!(lm.render().starts_with("one"));

        text.borrow_mut().set_content("two");
        assert!(lm.render().starts_with("two"));
    }

    #[test]
    fn test_render_recycles_buffers() {
        let mut lm = manager(10, 4, 1, 1);
        lm.add_component(CONTENT, Rc::new(Fill::new('.', Style::new())));
        lm.calculate_layout();
        lm.render();
        let after_first = lm.pool().stats();
        lm.render();
        let after_second = lm.pool().stats();
        assert!(after_second.hits > after_first.hits);
        assert_eq!(after_second.misses, after_first.misses);
    }

    #[test]
    fn test_render_frames_independent() {
        let mut lm = manager(4, 1, 0, 0);
        lm.add_component(CONTENT, Rc::new(Text::new("abcd")));
        lm.calculate_layout();
        let first = lm.render();
        lm.remove_component(CONTENT);
        let second = lm.render();
        assert_ne!(first, second);
        assert!(second.starts_with("    "));
    }
}
