//! Dual-mode email template editor core.
//!
//! The document is one canonical HTML string with two projections: a rendered
//! tree edited in `Visual` mode and the raw source edited in `Code` mode. The
//! browser supplies the rendered tree through [`RenderedSurface`];
//! [`TreeSurface`] is the native one.

pub mod document;
pub mod editor;
pub mod error;
pub mod export;
pub mod html;
pub mod image;
pub mod library;
pub mod selection;
pub mod send;
pub mod session;
pub mod surface;
pub mod sync;

pub use document::{DEFAULT_TEMPLATE, DevicePreview, Document, Mode};
pub use editor::Editor;
pub use error::EditorError;
pub use export::{CopyIndicator, ExportFile};
pub use image::{DiscardReason, PendingUpload, UploadOutcome, UploadTicket};
pub use library::{MemoryStore, STORAGE_KEY, SaveDialog, StoreError, TemplateLibrary, TemplateStore};
pub use selection::{ClickKind, ClickResponse, ClickTarget, Overlay};
pub use send::{SendDialog, SendStage, mailto_link};
pub use session::{GenerationGate, GenerationTicket};
pub use surface::{ElementHandle, Rect, RenderedSurface, TreeSurface};
pub use sync::ModeTransition;
