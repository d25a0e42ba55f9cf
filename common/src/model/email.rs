//! Options describing the email a user wants generated.
//!
//! `EmailOptions` is collected by the sidebar form in the frontend, posted to
//! `/api/generate` and deserialized by the backend, which turns it into a prompt.
//! Validation happens at the form boundary: an options value that fails
//! [`EmailOptions::validate`] never reaches the generation call.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tones offered by the options form. The first entry is the default.
pub const EMAIL_TONES: [&str; 6] = [
    "Professional",
    "Friendly",
    "Urgent",
    "Witty",
    "Empathetic",
    "Minimalist",
];

/// Kind of campaign the generated template is meant for.
///
/// Serialized with its display label so the JSON payload matches what the
/// prompt shows to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmailType {
    #[default]
    Newsletter,
    Promotional,
    Transactional,
    #[serde(rename = "Welcome Series")]
    Welcome,
    #[serde(rename = "Cold Outreach")]
    ColdOutreach,
}

impl EmailType {
    pub const ALL: [EmailType; 5] = [
        EmailType::Newsletter,
        EmailType::Promotional,
        EmailType::Transactional,
        EmailType::Welcome,
        EmailType::ColdOutreach,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmailType::Newsletter => "Newsletter",
            EmailType::Promotional => "Promotional",
            EmailType::Transactional => "Transactional",
            EmailType::Welcome => "Welcome Series",
            EmailType::ColdOutreach => "Cold Outreach",
        }
    }

    /// Inverse of [`EmailType::label`], used when reading a `<select>` value.
    pub fn from_label(label: &str) -> Option<EmailType> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl std::fmt::Display for EmailType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Input to the generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailOptions {
    /// Required. What the email is about.
    pub topic: String,
    pub audience: String,
    /// One of [`EMAIL_TONES`].
    pub tone: String,
    #[serde(rename = "type")]
    pub email_type: EmailType,
    /// Free text appended to the prompt as "Context/Details".
    pub additional_context: String,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            topic: String::new(),
            audience: "General".to_string(),
            tone: EMAIL_TONES[0].to_string(),
            email_type: EmailType::Promotional,
            additional_context: String::new(),
        }
    }
}

impl EmailOptions {
    /// Checks the constraints the form enforces before submitting.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.topic.trim().is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        if !EMAIL_TONES.contains(&self.tone.as_str()) {
            return Err(ValidationError::UnknownTone(self.tone.clone()));
        }
        Ok(())
    }
}

/// Input validation failures. These are blocked at the form boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a topic is required")]
    EmptyTopic,
    #[error("unknown tone `{0}`")]
    UnknownTone(String),
    #[error("a recipient is required")]
    EmptyRecipient,
    #[error("a subject is required")]
    EmptySubject,
    #[error("a template name is required")]
    EmptyName,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_type_serializes_with_display_label() {
        let json = serde_json::to_string(&EmailType::ColdOutreach).unwrap();
        assert_eq!(json, "\"Cold Outreach\"");
        let back: EmailType = serde_json::from_str("\"Welcome Series\"").unwrap();
        assert_eq!(back, EmailType::Welcome);
    }

    #[test]
    fn label_lookup_covers_every_type() {
        for t in EmailType::ALL {
            assert_eq!(EmailType::from_label(t.label()), Some(t));
        }
        assert_eq!(EmailType::from_label("Spam"), None);
    }

    #[test]
    fn options_use_camel_case_field_names() {
        let options = EmailOptions {
            topic: "Summer sale".into(),
            additional_context: "20% off".into(),
            ..EmailOptions::default()
        };
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["additionalContext"], "20% off");
        assert_eq!(value["type"], "Promotional");
        assert_eq!(value["audience"], "General");
        assert_eq!(value["tone"], "Professional");
    }

    #[test]
    fn blank_topic_is_rejected() {
        let options = EmailOptions {
            topic: "   ".into(),
            ..EmailOptions::default()
        };
        assert_eq!(options.validate(), Err(ValidationError::EmptyTopic));
    }

    #[test]
    fn tone_must_come_from_the_catalogue() {
        let options = EmailOptions {
            topic: "Launch".into(),
            tone: "Sarcastic".into(),
            ..EmailOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ValidationError::UnknownTone(t)) if t == "Sarcastic"
        ));
    }
}
