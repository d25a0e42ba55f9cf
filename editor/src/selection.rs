//! Tracks the selected image and the overlay drawn around it.
//!
//! The tracker is a two-state machine, `Unselected` and `Selected`. While an
//! image is selected the tracker owns the surface's viewport watch, so scroll
//! and resize notifications exist exactly as long as the selection does.
//! The overlay ring and toolbar position are derived from the cached rectangle
//! and recomputed from the live element on every refresh.

use crate::document::Mode;
use crate::surface::{ElementHandle, Rect, RenderedSurface};

/// Vertical gap between the bottom of the image and the floating toolbar.
pub const TOOLBAR_OFFSET: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKind {
    Image(ElementHandle),
    /// Anywhere inside the floating image toolbar.
    Toolbar,
    Other,
}

/// A pointer click, already classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickTarget {
    pub kind: ClickKind,
    /// The target is an anchor or sits inside one.
    pub within_anchor: bool,
}

impl ClickTarget {
    pub fn image(handle: ElementHandle) -> Self {
        Self {
            kind: ClickKind::Image(handle),
            within_anchor: false,
        }
    }

    pub fn toolbar() -> Self {
        Self {
            kind: ClickKind::Toolbar,
            within_anchor: false,
        }
    }

    pub fn other() -> Self {
        Self {
            kind: ClickKind::Other,
            within_anchor: false,
        }
    }
}

/// What the host should do with the originating event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickResponse {
    /// Suppress link navigation.
    pub prevent_default: bool,
    /// The click selected an image; keep it from reaching outer handlers.
    pub stop_propagation: bool,
}

/// Presentational output for the selected image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overlay {
    pub ring: Rect,
    pub toolbar_top: f64,
    pub toolbar_left: f64,
}

impl Overlay {
    fn from_rect(rect: Rect) -> Self {
        Self {
            ring: rect,
            toolbar_top: rect.bottom() + TOOLBAR_OFFSET,
            toolbar_left: rect.left,
        }
    }
}

struct Selected<W> {
    handle: ElementHandle,
    rect: Rect,
    url_input: String,
    _watch: W,
}

pub struct SelectionTracker<W> {
    selected: Option<Selected<W>>,
    epoch: u64,
}

impl<W> Default for SelectionTracker<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> SelectionTracker<W> {
    pub fn new() -> Self {
        Self {
            selected: None,
            epoch: 0,
        }
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }

    pub fn handle(&self) -> Option<ElementHandle> {
        self.selected.as_ref().map(|s| s.handle)
    }

    pub fn rect(&self) -> Option<Rect> {
        self.selected.as_ref().map(|s| s.rect)
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.rect().map(Overlay::from_rect)
    }

    /// Current value of the toolbar's URL field.
    pub fn url_input(&self) -> Option<&str> {
        self.selected.as_ref().map(|s| s.url_input.as_str())
    }

    pub fn set_url_input(&mut self, value: impl Into<String>) -> bool {
        match &mut self.selected {
            Some(selected) => {
                selected.url_input = value.into();
                true
            }
            None => false,
        }
    }

    /// Changes every time a different element gets selected or the selection
    /// is cleared. Pending work compares against it to detect staleness.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn select(&mut self, handle: ElementHandle, rect: Rect, src: String, watch: W) {
        self.selected = Some(Selected {
            handle,
            rect,
            url_input: src,
            _watch: watch,
        });
        self.epoch += 1;
    }

    /// Drops the selection and with it the viewport watch.
    pub fn clear(&mut self) -> bool {
        if self.selected.take().is_some() {
            self.epoch += 1;
            return true;
        }
        false
    }

    /// Applies a click on the rendered tree.
    pub fn handle_click<S>(&mut self, mode: Mode, surface: &S, target: ClickTarget) -> ClickResponse
    where
        S: RenderedSurface<ViewportWatch = W>,
    {
        let mut response = ClickResponse {
            prevent_default: target.within_anchor,
            stop_propagation: false,
        };
        if mode != Mode::Visual {
            return response;
        }
        match target.kind {
            ClickKind::Image(handle) if surface.is_attached(handle) => {
                let rect = surface.bounding_rect(handle).unwrap_or_default();
                let src = surface.image_source(handle).unwrap_or_default();
                match self.selected.as_mut() {
                    Some(selected) if selected.handle == handle => {
                        selected.rect = rect;
                        selected.url_input = src;
                    }
                    _ => {
                        let watch = surface.watch_viewport();
                        self.select(handle, rect, src, watch);
                    }
                }
                response.stop_propagation = true;
            }
            ClickKind::Toolbar => {}
            ClickKind::Image(_) | ClickKind::Other => {
                self.clear();
            }
        }
        response
    }

    /// Recomputes the cached rectangle from the live element. A selection
    /// whose element is gone is cleared. Returns true while still selected.
    pub fn refresh<S>(&mut self, surface: &S) -> bool
    where
        S: RenderedSurface<ViewportWatch = W>,
    {
        let Some(handle) = self.handle() else {
            return false;
        };
        let rect = surface
            .bounding_rect(handle)
            .filter(|_| surface.is_attached(handle));
        match (rect, self.selected.as_mut()) {
            (Some(rect), Some(selected)) => {
                selected.rect = rect;
                true
            }
            _ => {
                self.clear();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::TreeSurface;

    fn surface_with_images() -> (TreeSurface, Vec<ElementHandle>) {
        let mut surface = TreeSurface::new();
        surface.rebuild(r#"<img src="a.png"><p>text</p><img src="b.png">"#);
        let handles = surface.image_handles();
        surface.set_layout(handles[0], Rect::new(100.0, 20.0, 64.0, 64.0));
        (surface, handles)
    }

    #[test]
    fn clicking_an_image_selects_it_and_registers_the_watch() {
        let (surface, handles) = surface_with_images();
        let mut tracker = SelectionTracker::new();

        let response = tracker.handle_click(Mode::Visual, &surface, ClickTarget::image(handles[0]));
        assert!(response.stop_propagation);
        assert_eq!(tracker.handle(), Some(handles[0]));
        assert_eq!(tracker.url_input(), Some("a.png"));
        assert_eq!(surface.active_watches(), 1);

        let overlay = tracker.overlay().unwrap();
        assert_eq!(overlay.toolbar_top, 174.0);
        assert_eq!(overlay.toolbar_left, 20.0);
    }

    #[test]
    fn clicking_elsewhere_deselects_but_toolbar_clicks_do_not() {
        let (surface, handles) = surface_with_images();
        let mut tracker = SelectionTracker::new();
        tracker.handle_click(Mode::Visual, &surface, ClickTarget::image(handles[0]));

        tracker.handle_click(Mode::Visual, &surface, ClickTarget::toolbar());
        assert!(tracker.is_selected());

        tracker.handle_click(Mode::Visual, &surface, ClickTarget::other());
        assert!(!tracker.is_selected());
        assert_eq!(surface.active_watches(), 0);
    }

    #[test]
    fn selecting_another_image_swaps_the_watch() {
        let (surface, handles) = surface_with_images();
        let mut tracker = SelectionTracker::new();
        tracker.handle_click(Mode::Visual, &surface, ClickTarget::image(handles[0]));
        let epoch = tracker.epoch();
        tracker.handle_click(Mode::Visual, &surface, ClickTarget::image(handles[1]));
        assert_eq!(tracker.handle(), Some(handles[1]));
        assert_ne!(tracker.epoch(), epoch);
        assert_eq!(surface.active_watches(), 1);
    }

    #[test]
    fn anchor_clicks_suppress_navigation() {
        let (surface, _) = surface_with_images();
        let mut tracker = SelectionTracker::new();
        let target = ClickTarget {
            kind: ClickKind::Other,
            within_anchor: true,
        };
        let response = tracker.handle_click(Mode::Visual, &surface, target);
        assert!(response.prevent_default);
        assert!(!response.stop_propagation);
    }

    #[test]
    fn clicks_in_code_mode_never_select() {
        let (surface, handles) = surface_with_images();
        let mut tracker = SelectionTracker::new();
        tracker.handle_click(Mode::Code, &surface, ClickTarget::image(handles[0]));
        assert!(!tracker.is_selected());
    }

    #[test]
    fn refresh_follows_the_element_and_keeps_the_selection() {
        let (mut surface, handles) = surface_with_images();
        let mut tracker = SelectionTracker::new();
        tracker.handle_click(Mode::Visual, &surface, ClickTarget::image(handles[0]));

        surface.set_layout(handles[0], Rect::new(40.0, 20.0, 64.0, 64.0));
        assert!(tracker.refresh(&surface));
        assert_eq!(tracker.handle(), Some(handles[0]));
        assert_eq!(tracker.rect(), Some(Rect::new(40.0, 20.0, 64.0, 64.0)));
    }

    #[test]
    fn refresh_drops_a_detached_selection() {
        let (mut surface, handles) = surface_with_images();
        let mut tracker = SelectionTracker::new();
        tracker.handle_click(Mode::Visual, &surface, ClickTarget::image(handles[0]));

        let node = surface.tree().elements_named("img")[0];
        surface.tree_mut().detach(node);
        assert!(!tracker.refresh(&surface));
        assert!(!tracker.is_selected());
        assert_eq!(surface.active_watches(), 0);
    }
}
