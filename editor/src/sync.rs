//! Keeps the canonical text and the rendered tree consistent.
//!
//! There is no continuous two-way binding. Text flows from the rendered tree
//! into the document only on [`SyncController::capture_from_rendered`], and from
//! the document into the tree only on a rebuild, which happens when external
//! content arrives in `Visual` mode or when the editor switches back to
//! `Visual`. Whichever projection the [`Mode`] names is the only one allowed to
//! write.

use log::trace;

use crate::document::{Document, Mode};
use crate::error::EditorError;
use crate::surface::{ElementHandle, RenderedSurface};

/// What a call to [`SyncController::switch_mode`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    Unchanged,
    /// Switched to `Visual`; the rendered tree was rebuilt from the text.
    EnteredVisual,
    /// Switched to `Code`; nothing was rebuilt.
    EnteredCode,
}

pub struct SyncController<S: RenderedSurface> {
    document: Document,
    mode: Mode,
    surface: S,
}

impl<S: RenderedSurface> SyncController<S> {
    /// Starts in `Visual` mode with the tree built from `initial`.
    pub fn new(mut surface: S, initial: impl Into<String>) -> Self {
        let document = Document::new(initial);
        surface.rebuild(document.as_str());
        Self {
            document,
            mode: Mode::Visual,
            surface,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Replaces the canonical text unconditionally. In `Visual` mode the tree
    /// is rebuilt before returning. Returns true when a rebuild happened.
    pub fn set_from_external(&mut self, html: impl Into<String>) -> bool {
        self.document.replace(html.into());
        if self.mode == Mode::Visual {
            self.surface.rebuild(self.document.as_str());
            return true;
        }
        false
    }

    /// Re-serializes the rendered tree into the canonical text. Returns true
    /// when the text changed.
    pub fn capture_from_rendered(&mut self) -> Result<bool, EditorError> {
        self.require(Mode::Visual)?;
        Ok(self.document.replace(self.surface.serialize()))
    }

    /// Stores raw source typed in `Code` mode. The tree is left alone until
    /// the next switch to `Visual`.
    pub fn capture_from_raw(&mut self, text: impl Into<String>) -> Result<bool, EditorError> {
        self.require(Mode::Code)?;
        Ok(self.document.replace(text.into()))
    }

    pub fn switch_mode(&mut self, mode: Mode) -> ModeTransition {
        if self.mode == mode {
            return ModeTransition::Unchanged;
        }
        trace!("editor mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        match mode {
            Mode::Visual => {
                self.surface.rebuild(self.document.as_str());
                ModeTransition::EnteredVisual
            }
            Mode::Code => ModeTransition::EnteredCode,
        }
    }

    /// Runs an in-place edit of the rendered tree, then captures.
    pub fn edit_rendered<R>(&mut self, edit: impl FnOnce(&mut S) -> R) -> Result<R, EditorError> {
        self.require(Mode::Visual)?;
        let out = edit(&mut self.surface);
        self.capture_from_rendered()?;
        Ok(out)
    }

    /// Writes one image source into the live tree and captures. Only the image
    /// engine goes through here.
    pub(crate) fn write_image_source(
        &mut self,
        handle: ElementHandle,
        src: &str,
    ) -> Result<bool, EditorError> {
        self.require(Mode::Visual)?;
        if !self.surface.set_image_source(handle, src) {
            return Err(EditorError::StaleHandle);
        }
        self.capture_from_rendered()
    }

    fn require(&self, expected: Mode) -> Result<(), EditorError> {
        if self.mode != expected {
            return Err(EditorError::WrongMode {
                expected,
                actual: self.mode,
            });
        }
        Ok(())
    }
}
