use std::sync::LazyLock;

use common::model::email::EmailOptions;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::GenerateError;
use crate::config::ServerConfig;

const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEMPERATURE: f32 = 0.7;

const SYSTEM_INSTRUCTION: &str = "\
You are an expert email marketing developer and designer.
Your goal is to generate high-quality, responsive HTML email templates.

Rules:
1. Return ONLY the raw HTML code. Do not wrap it in markdown code blocks (no ```html).
2. Use inline CSS for all styling to ensure compatibility across email clients (Gmail, Outlook, etc.).
3. Use a max-width of 600px for the main container.
4. Make it responsive (use percentage widths where appropriate).
5. Use placeholder images from 'https://picsum.photos/width/height' where images are needed.
6. Ensure sufficient color contrast and professional typography.
7. Do not include <head> or <body> tags, just the container <div> or <table> wrapper that can be embedded.
8. Interpret the user's tone and audience requests to adjust the visual style (colors, fonts, spacing).
";

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```html\s*").expect("valid regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```$").expect("valid regex"));

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Client for the `generateContent` REST call.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            http: reqwest::Client::default(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    pub async fn generate(&self, options: &EmailOptions) -> Result<String, GenerateError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerateError::MissingCredential)?;
        let prompt = build_prompt(options);
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: [Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let response: GenerateContentResponse = self
            .http
            .post(format!("{}/{}:generateContent", ENDPOINT, self.model))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        let html = strip_fences(&text);
        if html.is_empty() {
            return Err(GenerateError::EmptyResponse);
        }
        Ok(html)
    }
}

pub fn build_prompt(options: &EmailOptions) -> String {
    format!(
        "Create an email template with the following specifications:\n\
         - Type: {}\n\
         - Topic: {}\n\
         - Target Audience: {}\n\
         - Tone: {}\n\
         - Context/Details: {}\n\
         \n\
         Make the design visually appealing and consistent with the requested tone.",
        options.email_type,
        options.topic,
        options.audience,
        options.tone,
        options.additional_context
    )
}

/// Removes a markdown fence the model sometimes wraps its answer in.
pub fn strip_fences(text: &str) -> String {
    let text = LEADING_FENCE.replace(text, "");
    TRAILING_FENCE.replace(&text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::email::EmailType;
    use pretty_assertions::assert_eq;

    #[test]
    fn fences_are_stripped() {
        assert_eq!(
            strip_fences("```html\n<div>hi</div>\n```"),
            "<div>hi</div>"
        );
        assert_eq!(strip_fences("  <p>plain</p>\n"), "<p>plain</p>");
    }

    #[test]
    fn inner_fences_are_kept() {
        assert_eq!(strip_fences("<pre>```</pre> x"), "<pre>```</pre> x");
    }

    #[test]
    fn prompt_lists_every_option() {
        let options = EmailOptions {
            topic: "Spring sale".into(),
            audience: "Gardeners".into(),
            tone: "Friendly".into(),
            email_type: EmailType::Promotional,
            additional_context: "20% off seeds".into(),
        };
        let prompt = build_prompt(&options);
        assert!(prompt.contains("- Type: Promotional\n"));
        assert!(prompt.contains("- Topic: Spring sale\n"));
        assert!(prompt.contains("- Target Audience: Gardeners\n"));
        assert!(prompt.contains("- Tone: Friendly\n"));
        assert!(prompt.contains("- Context/Details: 20% off seeds\n"));
    }

    #[test]
    fn request_body_matches_the_rest_shape() {
        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: [Part { text: "sys" }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text: "hi" }],
            }],
            generation_config: GenerationConfig { temperature: 0.5 },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "systemInstruction": { "parts": [{ "text": "sys" }] },
                "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }],
                "generationConfig": { "temperature": 0.5 }
            })
        );
    }

    #[actix_web::test]
    async fn missing_credential_is_reported() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            api_key: None,
            model: "m".into(),
            open_browser: false,
        };
        let client = GeminiClient::new(&config);
        let options = EmailOptions {
            topic: "x".into(),
            ..EmailOptions::default()
        };
        let err = client.generate(&options).await.unwrap_err();
        assert_eq!(err.to_string(), "API Key is missing");
    }
}
