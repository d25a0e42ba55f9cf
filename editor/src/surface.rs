//! The seam between the editor core and whatever hosts the rendered tree.
//!
//! In the browser the rendered tree is the content-editable DOM; natively it is
//! an [`HtmlTree`]. The core only ever talks to it through [`RenderedSurface`],
//! and only refers to its elements through [`ElementHandle`]s, which must be
//! re-validated with [`RenderedSurface::is_attached`] before every use.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::html::{HtmlTree, NodeId};
use crate::selection::{ClickKind, ClickTarget};

/// Weak reference to an image element of the rendered tree.
///
/// A handle carries the generation of the tree it was issued for; every
/// rebuild starts a new generation, so handles from a previous tree never
/// resolve again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    generation: u64,
    slot: usize,
}

impl ElementHandle {
    pub fn new(generation: u64, slot: usize) -> Self {
        Self { generation, slot }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Viewport-space rectangle, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Access to the live, directly editable projection of the document.
pub trait RenderedSurface {
    /// Keeps scroll/resize notifications flowing while alive. Dropping it
    /// deregisters them.
    type ViewportWatch;

    /// Replaces the whole tree with one built from `html`. Handles issued
    /// before the call stop resolving.
    fn rebuild(&mut self, html: &str);

    /// Serializes the current tree.
    fn serialize(&self) -> String;

    /// True when `handle` belongs to the current tree and its element is still
    /// reachable from the root.
    fn is_attached(&self, handle: ElementHandle) -> bool;

    fn image_source(&self, handle: ElementHandle) -> Option<String>;

    /// Writes the image source attribute. Returns false when the handle does
    /// not resolve.
    fn set_image_source(&mut self, handle: ElementHandle, src: &str) -> bool;

    /// Read-only geometry query. `None` when the handle does not resolve.
    fn bounding_rect(&self, handle: ElementHandle) -> Option<Rect>;

    fn watch_viewport(&self) -> Self::ViewportWatch;
}

/// Native [`RenderedSurface`] backed by an [`HtmlTree`].
///
/// There is no layout engine, so geometry is whatever the host recorded with
/// [`TreeSurface::set_layout`]; unrecorded images report an empty rectangle.
#[derive(Debug)]
pub struct TreeSurface {
    tree: HtmlTree,
    generation: u64,
    layout: HashMap<NodeId, Rect>,
    watchers: Rc<Cell<usize>>,
}

/// Viewport registration issued by [`TreeSurface`].
#[derive(Debug)]
pub struct WatchGuard {
    watchers: Rc<Cell<usize>>,
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.watchers.set(self.watchers.get().saturating_sub(1));
    }
}

impl Default for TreeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeSurface {
    pub fn new() -> Self {
        Self {
            tree: HtmlTree::parse(""),
            generation: 0,
            layout: HashMap::new(),
            watchers: Rc::new(Cell::new(0)),
        }
    }

    pub fn tree(&self) -> &HtmlTree {
        &self.tree
    }

    /// Direct access for simulating user edits of the rendered tree.
    pub fn tree_mut(&mut self) -> &mut HtmlTree {
        &mut self.tree
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handles of the attached images, in document order.
    pub fn image_handles(&self) -> Vec<ElementHandle> {
        self.tree
            .elements_named("img")
            .into_iter()
            .map(|id| ElementHandle::new(self.generation, id.index()))
            .collect()
    }

    pub fn set_layout(&mut self, handle: ElementHandle, rect: Rect) {
        if let Some(id) = self.resolve(handle) {
            self.layout.insert(id, rect);
        }
    }

    /// Number of live viewport registrations.
    pub fn active_watches(&self) -> usize {
        self.watchers.get()
    }

    /// Classifies a click on `node` the way a DOM host classifies its event
    /// target.
    pub fn click_target(&self, node: NodeId) -> ClickTarget {
        let kind = if self.tree.tag_name(node) == Some("img") && self.tree.is_attached(node) {
            ClickKind::Image(ElementHandle::new(self.generation, node.index()))
        } else {
            ClickKind::Other
        };
        ClickTarget {
            kind,
            within_anchor: self.tree.is_within(node, "a"),
        }
    }

    fn resolve(&self, handle: ElementHandle) -> Option<NodeId> {
        if handle.generation != self.generation {
            return None;
        }
        self.tree
            .elements_named("img")
            .into_iter()
            .find(|id| id.index() == handle.slot)
    }
}

impl RenderedSurface for TreeSurface {
    type ViewportWatch = WatchGuard;

    fn rebuild(&mut self, html: &str) {
        self.tree = HtmlTree::parse(html);
        self.generation += 1;
        self.layout.clear();
    }

    fn serialize(&self) -> String {
        self.tree.serialize()
    }

    fn is_attached(&self, handle: ElementHandle) -> bool {
        self.resolve(handle).is_some()
    }

    fn image_source(&self, handle: ElementHandle) -> Option<String> {
        let id = self.resolve(handle)?;
        Some(self.tree.attribute(id, "src").unwrap_or_default())
    }

    fn set_image_source(&mut self, handle: ElementHandle, src: &str) -> bool {
        match self.resolve(handle) {
            Some(id) => self.tree.set_attribute(id, "src", src),
            None => false,
        }
    }

    fn bounding_rect(&self, handle: ElementHandle) -> Option<Rect> {
        let id = self.resolve(handle)?;
        Some(self.layout.get(&id).copied().unwrap_or_default())
    }

    fn watch_viewport(&self) -> WatchGuard {
        self.watchers.set(self.watchers.get() + 1);
        WatchGuard {
            watchers: Rc::clone(&self.watchers),
        }
    }
}
