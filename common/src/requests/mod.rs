use serde::{Deserialize, Serialize};

use crate::model::email::EmailOptions;

/// Request payload for `POST /api/generate`.
pub type GenerateRequest = EmailOptions;

/// Successful response of `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub html: String,
}

/// Error body returned by the API. `message` is shown to the user as is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}
