use common::model::email::ValidationError;
use thiserror::Error;

use crate::document::Mode;
use crate::library::StoreError;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("operation needs {expected:?} mode but the editor is in {actual:?} mode")]
    WrongMode { expected: Mode, actual: Mode },

    #[error("the selected image is no longer part of the document")]
    StaleHandle,

    #[error("no image is selected")]
    NoSelection,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("template storage failed: {0}")]
    Storage(#[from] StoreError),

    #[error("could not encode saved templates: {0}")]
    Encode(#[from] serde_json::Error),
}
