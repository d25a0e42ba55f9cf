//! Read-only consumers of the canonical text.

use crate::document::Document;

pub const EXPORT_FILENAME: &str = "email_template.html";
pub const EXPORT_MEDIA_TYPE: &str = "text/html";
/// How long the "copied" indicator stays visible.
pub const COPY_FEEDBACK_MS: u32 = 2000;

/// A download offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

pub fn export_file(document: &Document) -> ExportFile {
    ExportFile {
        file_name: EXPORT_FILENAME,
        media_type: EXPORT_MEDIA_TYPE,
        bytes: document.as_str().as_bytes().to_vec(),
    }
}

/// Text placed on the clipboard.
pub fn clipboard_text(document: &Document) -> &str {
    document.as_str()
}

/// Token returned by [`CopyIndicator::show`]; only the latest one reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyToken(u64);

/// Transient "copied" flag that reverts after [`COPY_FEEDBACK_MS`].
#[derive(Debug, Default)]
pub struct CopyIndicator {
    visible: bool,
    epoch: u64,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) -> CopyToken {
        self.epoch += 1;
        self.visible = true;
        CopyToken(self.epoch)
    }

    /// Hides the indicator if `token` is still the latest. Returns true when
    /// it did.
    pub fn revert(&mut self, token: CopyToken) -> bool {
        if token.0 != self.epoch || !self.visible {
            return false;
        }
        self.visible = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_carries_the_exact_text() {
        let doc = Document::new("<p>é</p>");
        let file = export_file(&doc);
        assert_eq!(file.file_name, "email_template.html");
        assert_eq!(file.media_type, "text/html");
        assert_eq!(file.bytes, "<p>é</p>".as_bytes());
        assert_eq!(clipboard_text(&doc), "<p>é</p>");
    }

    #[test]
    fn only_the_latest_copy_reverts_the_indicator() {
        let mut indicator = CopyIndicator::new();
        let first = indicator.show();
        let second = indicator.show();

        assert!(!indicator.revert(first));
        assert!(indicator.is_visible());
        assert!(indicator.revert(second));
        assert!(!indicator.is_visible());
    }
}
