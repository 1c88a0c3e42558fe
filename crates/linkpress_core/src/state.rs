use std::fmt;

use crate::view_model::{AppViewModel, LinkRowView, Notice};
use crate::{HistoryStore, VerificationSession};

pub type RequestId = u64;

/// Result of a successful shortening, as shown in the result panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub short_url: String,
    pub original_url: String,
}

/// Why a shortening attempt that reached the network failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenFailure {
    /// The service answered with a non-success status.
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// The request could not be sent or the response not received.
    Network,
    /// The request timed out.
    Timeout,
    /// A success response without a usable short link.
    MalformedResponse,
}

impl ShortenFailure {
    /// Short, user-facing translation. The server-supplied message wins
    /// when there is one.
    pub fn user_message(&self) -> String {
        match self {
            ShortenFailure::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            ShortenFailure::Rejected { message: None, .. } | ShortenFailure::Network => {
                "Failed to shorten URL".to_string()
            }
            ShortenFailure::Timeout => "The shortening service timed out".to_string(),
            ShortenFailure::MalformedResponse => {
                "The shortening service returned an unexpected response".to_string()
            }
        }
    }
}

impl fmt::Display for ShortenFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortenFailure::Rejected { status, message } => match message {
                Some(message) => write!(f, "rejected with status {status}: {message}"),
                None => write!(f, "rejected with status {status}"),
            },
            ShortenFailure::Network => write!(f, "network error"),
            ShortenFailure::Timeout => write!(f, "timeout"),
            ShortenFailure::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    session: VerificationSession,
    next_request_id: RequestId,
    in_flight: Vec<RequestId>,
    result: Option<ShortenOutcome>,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, history: &HistoryStore) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            challenge_ready: self.session.token().is_some(),
            challenge_generation: self.session.generation(),
            submitting: !self.in_flight.is_empty(),
            result: self.result.clone(),
            notice: self.notice.clone(),
            history: history
                .links()
                .iter()
                .map(|link| LinkRowView {
                    id: link.id.clone(),
                    short_url: link.short_url.clone(),
                    original_url: link.original_url.clone(),
                    created_at: link.created_at.clone(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    pub(crate) fn set_input(&mut self, input: String) {
        self.input = input;
    }

    pub(crate) fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub(crate) fn session_mut(&mut self) -> &mut VerificationSession {
        &mut self.session
    }

    /// Allocates a monotonically increasing request id and records it as
    /// in flight.
    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.next_request_id += 1;
        let id = self.next_request_id;
        self.in_flight.push(id);
        id
    }

    /// Marks `id` resolved. Returns true when `id` is the most recently
    /// issued request; an older, overlapped request must not overwrite the
    /// panel a newer one already populated.
    pub(crate) fn finish_request(&mut self, id: RequestId) -> bool {
        self.in_flight.retain(|pending| *pending != id);
        id == self.next_request_id
    }

    pub(crate) fn set_result(&mut self, result: Option<ShortenOutcome>) {
        self.result = result;
    }

    pub(crate) fn result_short_url(&self) -> Option<&str> {
        self.result.as_ref().map(|outcome| outcome.short_url.as_str())
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns and clears the dirty flag; the shell renders when it was set.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
