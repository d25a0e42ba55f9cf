//! The editing session as the host sees it.
//!
//! [`Editor`] owns the [`SyncController`] and the [`SelectionTracker`] and is
//! the only writer of either, which keeps the "no selection outside `Visual`"
//! rule in one place.

use log::debug;

use crate::document::{DevicePreview, Document, Mode};
use crate::error::EditorError;
use crate::export::{self, ExportFile};
use crate::image::{self, PendingUpload, UploadOutcome, UploadTicket};
use crate::selection::{ClickResponse, ClickTarget, Overlay, SelectionTracker};
use crate::surface::{ElementHandle, RenderedSurface};
use crate::sync::{ModeTransition, SyncController};

pub struct Editor<S: RenderedSurface> {
    sync: SyncController<S>,
    selection: SelectionTracker<S::ViewportWatch>,
    device: DevicePreview,
}

impl<S: RenderedSurface> Editor<S> {
    pub fn new(surface: S, initial: impl Into<String>) -> Self {
        Self {
            sync: SyncController::new(surface, initial),
            selection: SelectionTracker::new(),
            device: DevicePreview::default(),
        }
    }

    pub fn document(&self) -> &Document {
        self.sync.document()
    }

    pub fn mode(&self) -> Mode {
        self.sync.mode()
    }

    pub fn surface(&self) -> &S {
        self.sync.surface()
    }

    pub fn device(&self) -> DevicePreview {
        self.device
    }

    pub fn set_device(&mut self, device: DevicePreview) {
        self.device = device;
    }

    pub fn char_count(&self) -> usize {
        self.document().char_count()
    }

    pub fn footer_tip(&self) -> &'static str {
        self.mode().footer_tip()
    }

    /// Loads generated or saved content. Any selection refers to the old tree
    /// and is dropped.
    pub fn set_from_external(&mut self, html: impl Into<String>) -> bool {
        self.selection.clear();
        self.sync.set_from_external(html)
    }

    /// Called after the user edited the rendered tree directly.
    pub fn capture_from_rendered(&mut self) -> Result<bool, EditorError> {
        let changed = self.sync.capture_from_rendered()?;
        self.selection.refresh(self.sync.surface());
        Ok(changed)
    }

    pub fn capture_from_raw(&mut self, text: impl Into<String>) -> Result<bool, EditorError> {
        self.sync.capture_from_raw(text)
    }

    pub fn switch_mode(&mut self, mode: Mode) -> ModeTransition {
        let transition = self.sync.switch_mode(mode);
        if transition != ModeTransition::Unchanged {
            self.selection.clear();
        }
        transition
    }

    /// Applies an edit to the rendered tree and captures the result.
    pub fn edit_rendered<R>(&mut self, edit: impl FnOnce(&mut S) -> R) -> Result<R, EditorError> {
        let out = self.sync.edit_rendered(edit)?;
        self.selection.refresh(self.sync.surface());
        Ok(out)
    }

    pub fn click(&mut self, target: ClickTarget) -> ClickResponse {
        self.selection
            .handle_click(self.sync.mode(), self.sync.surface(), target)
    }

    /// Scroll or resize somewhere in the viewport.
    pub fn viewport_changed(&mut self) -> bool {
        self.selection.refresh(self.sync.surface())
    }

    /// The toolbar's close control.
    pub fn dismiss_selection(&mut self) -> bool {
        self.selection.clear()
    }

    pub fn selected(&self) -> Option<ElementHandle> {
        self.selection.handle()
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.selection.overlay()
    }

    pub fn url_input(&self) -> Option<&str> {
        self.selection.url_input()
    }

    pub fn set_url_input(&mut self, value: impl Into<String>) -> bool {
        self.selection.set_url_input(value)
    }

    /// Points the selected image at `url`. An empty URL does nothing. The
    /// selection stays so the toolbar remains open.
    pub fn replace_image_from_url(&mut self, url: &str) -> Result<bool, EditorError> {
        let url = url.trim();
        if url.is_empty() {
            debug!("empty image URL ignored");
            return Ok(false);
        }
        let handle = self.selection.handle().ok_or(EditorError::NoSelection)?;
        if self.sync.mode() != Mode::Visual || !self.sync.surface().is_attached(handle) {
            self.selection.clear();
            return Err(EditorError::StaleHandle);
        }
        let changed = self.sync.write_image_source(handle, url)?;
        self.selection.set_url_input(url);
        self.selection.refresh(self.sync.surface());
        Ok(changed)
    }

    /// Submits the toolbar's URL field.
    pub fn submit_url_input(&mut self) -> Result<bool, EditorError> {
        let url = self.selection.url_input().unwrap_or_default().to_owned();
        if url.trim().is_empty() {
            return Ok(false);
        }
        self.replace_image_from_url(&url)
    }

    /// Binds a picked file to the current selection. `None` when no file was
    /// picked or nothing is selected.
    pub fn begin_upload<F>(&self, file: Option<F>) -> Option<PendingUpload<F>> {
        let file = file?;
        let handle = self.selection.handle()?;
        if self.sync.mode() != Mode::Visual {
            return None;
        }
        Some(PendingUpload::new(
            UploadTicket::new(handle, self.selection.epoch()),
            file,
        ))
    }

    /// Commits converted file bytes if the upload's selection is still live.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        bytes: &[u8],
        mime: Option<&str>,
    ) -> Result<UploadOutcome, EditorError> {
        if let Err(reason) =
            image::check_ticket(ticket, self.sync.mode(), &self.selection, self.sync.surface())
        {
            debug!("discarding upload: {reason:?}");
            return Ok(UploadOutcome::Discarded(reason));
        }
        let url = image::to_data_url(bytes, mime);
        self.sync.write_image_source(ticket.handle(), &url)?;
        self.selection.set_url_input(url);
        self.selection.refresh(self.sync.surface());
        Ok(UploadOutcome::Applied)
    }

    pub fn export_file(&self) -> ExportFile {
        export::export_file(self.document())
    }

    pub fn clipboard_text(&self) -> &str {
        export::clipboard_text(self.document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::DiscardReason;
    use crate::surface::TreeSurface;
    use pretty_assertions::assert_eq;

    const TWO_IMAGES: &str = r#"<div><img src="a.png" alt="A"><p>x</p><img src="b.png" alt="B"></div>"#;

    fn editor_with_selection() -> Editor<TreeSurface> {
        let mut editor = Editor::new(TreeSurface::new(), TWO_IMAGES);
        let first = editor.surface().image_handles()[0];
        editor.click(ClickTarget::image(first));
        editor
    }

    #[test]
    fn url_replacement_keeps_the_selection() {
        let mut editor = editor_with_selection();
        assert!(editor.replace_image_from_url("https://x/c.png").unwrap());
        assert!(editor.selected().is_some());
        assert_eq!(editor.url_input(), Some("https://x/c.png"));
        assert_eq!(
            editor.document().as_str(),
            r#"<div><img src="https://x/c.png" alt="A"><p>x</p><img src="b.png" alt="B"></div>"#
        );
    }

    #[test]
    fn url_replacement_without_selection_is_an_error() {
        let mut editor = Editor::new(TreeSurface::new(), TWO_IMAGES);
        assert!(matches!(
            editor.replace_image_from_url("c.png"),
            Err(EditorError::NoSelection)
        ));
        assert!(!editor.replace_image_from_url("  ").unwrap());
    }

    #[test]
    fn upload_applies_a_data_url() {
        let mut editor = editor_with_selection();
        let pending = editor.begin_upload(Some("file")).unwrap();
        let (ticket, _) = pending.into_parts();
        let outcome = editor
            .complete_upload(ticket, b"abc", Some("image/png"))
            .unwrap();
        assert_eq!(outcome, UploadOutcome::Applied);
        assert!(
            editor
                .document()
                .as_str()
                .starts_with(r#"<div><img src="data:image/png;base64,YWJj" alt="A">"#)
        );
    }

    #[test]
    fn no_file_picked_is_a_no_op() {
        let editor = editor_with_selection();
        assert!(editor.begin_upload::<&str>(None).is_none());
    }

    #[test]
    fn upload_is_discarded_after_a_mode_round_trip() {
        let mut editor = editor_with_selection();
        let ticket = editor.begin_upload(Some(())).unwrap().ticket();
        editor.switch_mode(Mode::Code);
        let before = editor.document().snapshot();

        assert_eq!(
            editor.complete_upload(ticket, b"abc", None).unwrap(),
            UploadOutcome::Discarded(DiscardReason::ModeChanged)
        );
        editor.switch_mode(Mode::Visual);
        assert_eq!(
            editor.complete_upload(ticket, b"abc", None).unwrap(),
            UploadOutcome::Discarded(DiscardReason::SelectionChanged)
        );
        assert_eq!(editor.document().as_str(), before);
    }

    #[test]
    fn upload_is_discarded_when_another_image_was_selected() {
        let mut editor = editor_with_selection();
        let ticket = editor.begin_upload(Some(())).unwrap().ticket();
        let second = editor.surface().image_handles()[1];
        editor.click(ClickTarget::image(second));

        assert_eq!(
            editor.complete_upload(ticket, b"abc", None).unwrap(),
            UploadOutcome::Discarded(DiscardReason::SelectionChanged)
        );
        assert_eq!(editor.document().as_str(), TWO_IMAGES);
    }

    #[test]
    fn upload_is_discarded_when_the_image_was_deleted() {
        let mut editor = editor_with_selection();
        let ticket = editor.begin_upload(Some(())).unwrap().ticket();
        // Deleting the element by typing; geometry has not been refreshed yet.
        editor
            .sync
            .edit_rendered(|surface| {
                let node = surface.tree().elements_named("img")[0];
                surface.tree_mut().detach(node);
            })
            .unwrap();

        assert_eq!(
            editor.complete_upload(ticket, b"abc", None).unwrap(),
            UploadOutcome::Discarded(DiscardReason::Detached)
        );
    }

    #[test]
    fn external_content_drops_the_selection() {
        let mut editor = editor_with_selection();
        editor.set_from_external("<p>new</p>");
        assert_eq!(editor.selected(), None);
        assert_eq!(editor.surface().active_watches(), 0);
    }

    #[test]
    fn chrome_follows_the_mode() {
        let mut editor = Editor::new(TreeSurface::new(), "<p>hi</p>");
        assert_eq!(editor.char_count(), 9);
        assert!(editor.footer_tip().starts_with("Tip:"));
        editor.switch_mode(Mode::Code);
        assert_eq!(editor.footer_tip(), "Editing raw HTML source code.");
    }
}
