//! # Generation Service Module
//!
//! Exposes `POST /api/generate`, which turns the sidebar's `EmailOptions` into
//! an HTML email template by calling the generative text service with the
//! credential held by the server.
//!
//! ## Sub-modules:
//! - `gemini`: Builds the prompt, performs the upstream call and cleans up the
//!   returned text.
//! - `process`: The Actix handler.

mod gemini;
mod process;

pub use gemini::GeminiClient;

use actix_web::http::StatusCode;
use actix_web::web::{post, scope};
use actix_web::{HttpResponse, ResponseError, Scope};
use common::model::email::ValidationError;
use common::requests::ApiError;
use thiserror::Error;

const API_PATH: &str = "/api";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API Key is missing")]
    MissingCredential,
    #[error("Failed to generate email template. Please try again.")]
    Upstream(#[from] reqwest::Error),
    #[error("Failed to generate email template. Please try again.")]
    EmptyResponse,
    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

impl ResponseError for GenerateError {
    fn status_code(&self) -> StatusCode {
        match self {
            GenerateError::MissingCredential => StatusCode::SERVICE_UNAVAILABLE,
            GenerateError::Upstream(_) | GenerateError::EmptyResponse => StatusCode::BAD_GATEWAY,
            GenerateError::Invalid(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiError {
            message: self.to_string(),
        })
    }
}

/// Configures and returns the Actix `Scope` for the generation routes.
///
/// # Registered Routes:
///
/// *   **`POST /generate`**:
///     - **Handler**: `process::process`
///     - **Description**: Expects a JSON `EmailOptions` payload and answers with
///       `{ "html": ... }`, or with `{ "message": ... }` and an error status.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/generate", post().to(process::process))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, test, App};
    use crate::config::ServerConfig;

    fn app_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            api_key: None,
            model: "gemini-2.5-flash".into(),
            open_browser: false,
        }
    }

    #[actix_web::test]
    async fn upstream_errors_carry_the_user_message() {
        let response = GenerateError::EmptyResponse.error_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = to_bytes(response.into_body()).await.unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            error.message,
            "Failed to generate email template. Please try again."
        );
    }

    #[actix_web::test]
    async fn empty_topic_is_rejected() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(GeminiClient::new(&app_config())))
                .service(configure_routes()),
        )
        .await;
        let request = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(common::model::email::EmailOptions::default())
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_key_is_surfaced_as_json() {
        let app = test::init_service(
            App::new()
                .app_data(actix_web::web::Data::new(GeminiClient::new(&app_config())))
                .service(configure_routes()),
        )
        .await;
        let options = common::model::email::EmailOptions {
            topic: "Launch".into(),
            ..Default::default()
        };
        let request = test::TestRequest::post()
            .uri("/api/generate")
            .set_json(options)
            .to_request();
        let error: ApiError = test::call_and_read_body_json(&app, request).await;
        assert_eq!(error.message, "API Key is missing");
    }
}
