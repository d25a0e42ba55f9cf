//! Simulated send dialog and the mail client handoff.

use common::model::email::ValidationError;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const DEFAULT_SUBJECT: &str = "My Email Template";
/// Length of the simulated delivery.
pub const SEND_DELAY_MS: u32 = 1500;
/// The success view closes itself after this long.
pub const SENT_CLOSE_MS: u32 = 2000;

/// Characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// `mailto:` link carrying only the subject.
pub fn mailto_link(recipient: &str, subject: &str) -> String {
    format!(
        "mailto:{}?subject={}",
        recipient.trim(),
        utf8_percent_encode(subject, COMPONENT)
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SendStage {
    #[default]
    Closed,
    Editing,
    Sending,
    Sent,
}

#[derive(Debug, Default)]
pub struct SendDialog {
    stage: SendStage,
    pub recipient: String,
    pub subject: String,
}

impl SendDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &SendStage {
        &self.stage
    }

    pub fn is_open(&self) -> bool {
        self.stage != SendStage::Closed
    }

    pub fn open(&mut self) {
        self.stage = SendStage::Editing;
        self.recipient.clear();
        self.subject = DEFAULT_SUBJECT.to_owned();
    }

    pub fn close(&mut self) {
        self.stage = SendStage::Closed;
    }

    /// Validates the form and moves to `Sending`. Returns `Ok(false)` when the
    /// dialog is not accepting a submit.
    pub fn begin_send(&mut self) -> Result<bool, ValidationError> {
        if self.stage != SendStage::Editing {
            return Ok(false);
        }
        if self.recipient.trim().is_empty() {
            return Err(ValidationError::EmptyRecipient);
        }
        if self.subject.trim().is_empty() {
            return Err(ValidationError::EmptySubject);
        }
        self.stage = SendStage::Sending;
        Ok(true)
    }

    pub fn finish_send(&mut self) -> bool {
        if self.stage != SendStage::Sending {
            return false;
        }
        self.stage = SendStage::Sent;
        true
    }

    /// Link for the "open in mail client" action.
    pub fn mailto(&self) -> String {
        mailto_link(&self.recipient, &self.subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("My Email Template", "My%20Email%20Template")]
    #[case("Q&A: 50% off!", "Q%26A%3A%2050%25%20off!")]
    #[case("it's (new) ~*", "it's%20(new)%20~*")]
    #[case("café", "caf%C3%A9")]
    fn subject_is_component_encoded(#[case] subject: &str, #[case] encoded: &str) {
        assert_eq!(
            mailto_link("a@b.co", subject),
            format!("mailto:a@b.co?subject={encoded}")
        );
    }

    #[test]
    fn opening_resets_the_form() {
        let mut dialog = SendDialog::new();
        dialog.open();
        dialog.recipient = "x@y.z".into();
        dialog.subject = "other".into();
        dialog.close();
        dialog.open();
        assert_eq!(dialog.recipient, "");
        assert_eq!(dialog.subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn send_requires_a_recipient_and_refuses_reentry() {
        let mut dialog = SendDialog::new();
        dialog.open();
        assert_eq!(dialog.begin_send(), Err(ValidationError::EmptyRecipient));

        dialog.recipient = "x@y.z".into();
        assert_eq!(dialog.begin_send(), Ok(true));
        assert_eq!(dialog.begin_send(), Ok(false));
        assert!(dialog.finish_send());
        assert_eq!(dialog.stage(), &SendStage::Sent);
    }
}
