//! Guards the template-generation call.
//!
//! The gate follows [`LoadingState`]: submitting moves it to `Generating` and
//! hands out a ticket, and while a ticket is outstanding further submits are
//! refused. There is no queue and no cancellation.

use common::model::generation::LoadingState;
use log::{debug, warn};

/// Proof that a generation call is outstanding.
#[derive(Debug, PartialEq, Eq)]
pub struct GenerationTicket(u64);

#[derive(Debug, Default)]
pub struct GenerationGate {
    state: LoadingState,
    issued: u64,
    notice: Option<String>,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    /// The trigger is disabled while this is true.
    pub fn is_busy(&self) -> bool {
        self.state == LoadingState::Generating
    }

    /// Dismissible failure message from the last call.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// `None` while another call is outstanding.
    pub fn begin(&mut self) -> Option<GenerationTicket> {
        if self.is_busy() {
            debug!("generation already in flight, ignoring submit");
            return None;
        }
        self.state = LoadingState::Generating;
        self.notice = None;
        self.issued += 1;
        Some(GenerationTicket(self.issued))
    }

    /// Settles the outstanding call. Returns the HTML to load on success; on
    /// failure the message becomes the notice and the document is left alone.
    pub fn finish(
        &mut self,
        ticket: GenerationTicket,
        result: Result<String, String>,
    ) -> Option<String> {
        if ticket.0 != self.issued || !self.is_busy() {
            return None;
        }
        match result {
            Ok(html) => {
                self.state = LoadingState::Success;
                Some(html)
            }
            Err(message) => {
                warn!("generation failed: {message}");
                self.state = LoadingState::Error;
                self.notice = Some(message);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_submit_is_refused_while_generating() {
        let mut gate = GenerationGate::new();
        let ticket = gate.begin().unwrap();
        assert!(gate.begin().is_none());
        assert_eq!(gate.state(), LoadingState::Generating);

        assert_eq!(gate.finish(ticket, Ok("<p>hi</p>".into())), Some("<p>hi</p>".into()));
        assert_eq!(gate.state(), LoadingState::Success);
        assert!(gate.begin().is_some());
    }

    #[test]
    fn failures_leave_a_dismissible_notice() {
        let mut gate = GenerationGate::new();
        let ticket = gate.begin().unwrap();
        assert_eq!(gate.finish(ticket, Err("API Key is missing".into())), None);
        assert_eq!(gate.state(), LoadingState::Error);
        assert_eq!(gate.notice(), Some("API Key is missing"));

        gate.dismiss_notice();
        assert_eq!(gate.notice(), None);
    }

    #[test]
    fn resubmitting_clears_the_previous_notice() {
        let mut gate = GenerationGate::new();
        let ticket = gate.begin().unwrap();
        gate.finish(ticket, Err("boom".into()));
        gate.begin().unwrap();
        assert_eq!(gate.notice(), None);
    }
}
