//! [`RenderedSurface`] over the content-editable DOM subtree.
//!
//! Image elements are handed out as slots in a per-generation table; a rebuild
//! replaces the subtree and empties the table. Attachment is checked with
//! `Node::contains` against the editor root on every use.

use std::cell::RefCell;

use editor::selection::{ClickKind, ClickTarget};
use editor::{ElementHandle, Rect, RenderedSurface};
use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget};
use yew::{Callback, NodeRef};

/// Class of the floating image toolbar. The toolbar is rendered outside the
/// surface root, so its clicks never reach [`DomSurface::click_target`].
pub const TOOLBAR_CLASS: &str = "image-toolbar";

pub struct DomSurface {
    root: NodeRef,
    generation: u64,
    slots: RefCell<Vec<Element>>,
    /// Markup waiting for the root to mount.
    pending: RefCell<Option<String>>,
    on_viewport: Callback<()>,
}

/// Window scroll (capture phase) and resize listeners. Removed on drop.
pub struct ViewportListeners {
    _scroll: EventListener,
    _resize: EventListener,
}

impl DomSurface {
    pub fn new(root: NodeRef, on_viewport: Callback<()>) -> Self {
        Self {
            root,
            generation: 0,
            slots: RefCell::new(Vec::new()),
            pending: RefCell::new(None),
            on_viewport,
        }
    }

    /// Writes markup that arrived before the root was mounted.
    pub fn flush_pending(&self) {
        let Some(root) = self.root.cast::<Element>() else {
            return;
        };
        if let Some(html) = self.pending.borrow_mut().take() {
            root.set_inner_html(&html);
        }
    }

    /// Classifies the target of a click inside the editor.
    pub fn click_target(&self, target: Option<EventTarget>) -> ClickTarget {
        let Some(element) = target.and_then(|t| t.dyn_into::<Element>().ok()) else {
            return ClickTarget::other();
        };
        let within_anchor = element.closest("a").ok().flatten().is_some();
        let kind = if element.tag_name().eq_ignore_ascii_case("img") && self.contains(&element) {
            ClickKind::Image(self.issue(element))
        } else {
            ClickKind::Other
        };
        ClickTarget { kind, within_anchor }
    }

    fn issue(&self, element: Element) -> ElementHandle {
        let mut slots = self.slots.borrow_mut();
        let slot = match slots.iter().position(|e| *e == element) {
            Some(slot) => slot,
            None => {
                slots.push(element);
                slots.len() - 1
            }
        };
        ElementHandle::new(self.generation, slot)
    }

    fn contains(&self, element: &Element) -> bool {
        self.root
            .cast::<Element>()
            .is_some_and(|root| root.contains(Some(element)))
    }

    fn resolve(&self, handle: ElementHandle) -> Option<Element> {
        if handle.generation() != self.generation {
            return None;
        }
        let element = self.slots.borrow().get(handle.slot()).cloned()?;
        self.contains(&element).then_some(element)
    }
}

impl RenderedSurface for DomSurface {
    type ViewportWatch = ViewportListeners;

    fn rebuild(&mut self, html: &str) {
        self.generation += 1;
        self.slots.borrow_mut().clear();
        match self.root.cast::<Element>() {
            Some(root) => {
                *self.pending.borrow_mut() = None;
                root.set_inner_html(html);
            }
            None => {
                self.pending.replace(Some(html.to_string()));
            }
        }
    }

    fn serialize(&self) -> String {
        if let Some(html) = self.pending.borrow().as_ref() {
            return html.clone();
        }
        self.root
            .cast::<Element>()
            .map(|root| root.inner_html())
            .unwrap_or_default()
    }

    fn is_attached(&self, handle: ElementHandle) -> bool {
        self.resolve(handle).is_some()
    }

    fn image_source(&self, handle: ElementHandle) -> Option<String> {
        let element = self.resolve(handle)?;
        Some(element.get_attribute("src").unwrap_or_default())
    }

    fn set_image_source(&mut self, handle: ElementHandle, src: &str) -> bool {
        self.resolve(handle)
            .is_some_and(|element| element.set_attribute("src", src).is_ok())
    }

    fn bounding_rect(&self, handle: ElementHandle) -> Option<Rect> {
        let rect = self.resolve(handle)?.get_bounding_client_rect();
        Some(Rect::new(rect.top(), rect.left(), rect.width(), rect.height()))
    }

    fn watch_viewport(&self) -> ViewportListeners {
        let window = gloo_utils::window();
        let on_scroll = self.on_viewport.clone();
        let on_resize = self.on_viewport.clone();
        ViewportListeners {
            _scroll: EventListener::new_with_options(
                &window,
                "scroll",
                EventListenerOptions::run_in_capture_phase(),
                move |_| on_scroll.emit(()),
            ),
            _resize: EventListener::new(&window, "resize", move |_| on_resize.emit(())),
        }
    }
}
