use common::model::email::EmailOptions;
use common::requests::{ApiError, GenerateResponse};
use gloo_net::http::Request;

const FALLBACK_MESSAGE: &str = "Failed to generate email template. Please try again.";

/// Calls `POST /api/generate`. The error is the message to show the user.
pub async fn generate_template(options: &EmailOptions) -> Result<String, String> {
    let response = Request::post("/api/generate")
        .json(options)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| {
            gloo_console::error!(format!("Generation request failed: {}", e));
            FALLBACK_MESSAGE.to_string()
        })?;

    if response.ok() {
        return response
            .json::<GenerateResponse>()
            .await
            .map(|body| body.html)
            .map_err(|_| FALLBACK_MESSAGE.to_string());
    }

    match response.json::<ApiError>().await {
        Ok(error) => Err(error.message),
        Err(_) => Err(FALLBACK_MESSAGE.to_string()),
    }
}
