//! Image source replacement.
//!
//! Uploads are two-phase: [`crate::Editor::begin_upload`] hands out a
//! [`PendingUpload`] that remembers which element was selected, the host
//! converts the file asynchronously, and [`crate::Editor::complete_upload`]
//! re-checks that the same element is still selected and attached before
//! writing. A completion that lost the race is discarded.

use base64::{Engine as _, engine::general_purpose};

use crate::document::Mode;
use crate::selection::SelectionTracker;
use crate::surface::{ElementHandle, RenderedSurface};

/// Identifies the selection an upload was started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket {
    handle: ElementHandle,
    epoch: u64,
}

impl UploadTicket {
    pub(crate) fn new(handle: ElementHandle, epoch: u64) -> Self {
        Self { handle, epoch }
    }

    pub fn handle(&self) -> ElementHandle {
        self.handle
    }
}

/// A picked file waiting to be converted, bound to the selection it targets.
#[derive(Debug)]
pub struct PendingUpload<F> {
    ticket: UploadTicket,
    file: F,
}

impl<F> PendingUpload<F> {
    pub(crate) fn new(ticket: UploadTicket, file: F) -> Self {
        Self { ticket, file }
    }

    pub fn ticket(&self) -> UploadTicket {
        self.ticket
    }

    pub fn file(&self) -> &F {
        &self.file
    }

    pub fn into_parts(self) -> (UploadTicket, F) {
        (self.ticket, self.file)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Applied,
    Discarded(DiscardReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscardReason {
    /// The editor left `Visual` mode while the file was being read.
    ModeChanged,
    /// The image was deselected or another one was selected.
    SelectionChanged,
    /// The element is no longer part of the rendered tree.
    Detached,
}

/// Checks that `ticket` still describes the live selection.
pub(crate) fn check_ticket<S: RenderedSurface>(
    ticket: UploadTicket,
    mode: Mode,
    selection: &SelectionTracker<S::ViewportWatch>,
    surface: &S,
) -> Result<(), DiscardReason> {
    if mode != Mode::Visual {
        return Err(DiscardReason::ModeChanged);
    }
    if selection.epoch() != ticket.epoch || selection.handle() != Some(ticket.handle) {
        return Err(DiscardReason::SelectionChanged);
    }
    if !surface.is_attached(ticket.handle) {
        return Err(DiscardReason::Detached);
    }
    Ok(())
}

/// Encodes file bytes as a self-contained `data:` URL.
///
/// `mime` is the type reported by the file picker; when it is missing or
/// empty the type is sniffed from the content.
pub fn to_data_url(bytes: &[u8], mime: Option<&str>) -> String {
    let mime = match mime.map(str::trim) {
        Some(m) if !m.is_empty() => m,
        _ => sniff_mime(bytes),
    };
    format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Best-effort image type detection from magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else if looks_like_svg(bytes) {
        "image/svg+xml"
    } else {
        "application/octet-stream"
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(256)];
    String::from_utf8_lossy(head)
        .trim_start_matches('\u{feff}')
        .trim_start()
        .to_ascii_lowercase()
        .split_once('>')
        .is_some_and(|(first, rest)| first.starts_with("<svg") || rest.contains("<svg"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::png(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0], "image/png")]
    #[case::jpeg(&[0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg")]
    #[case::gif(b"GIF89a....", "image/gif")]
    #[case::webp(b"RIFF\0\0\0\0WEBPVP8 ", "image/webp")]
    #[case::svg(b"<?xml version=\"1.0\"?><svg xmlns=\"x\"></svg>", "image/svg+xml")]
    #[case::unknown(b"hello", "application/octet-stream")]
    fn sniffs_common_image_types(#[case] bytes: &[u8], #[case] expected: &str) {
        assert_eq!(sniff_mime(bytes), expected);
    }

    #[test]
    fn data_url_prefers_the_reported_type() {
        assert_eq!(
            to_data_url(b"abc", Some("image/x-icon")),
            "data:image/x-icon;base64,YWJj"
        );
    }

    #[test]
    fn data_url_falls_back_to_sniffing() {
        let url = to_data_url(&[0xFF, 0xD8, 0xFF], Some(""));
        assert_eq!(url, "data:image/jpeg;base64,/9j/");
    }
}
