use crate::ShortenOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Short user-facing notification, rendered as a toast/status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    /// A verification token is currently held.
    pub challenge_ready: bool,
    /// The presentation surface re-mounts the widget when this moves.
    pub challenge_generation: u64,
    /// One or more submissions are in flight.
    pub submitting: bool,
    pub result: Option<ShortenOutcome>,
    pub notice: Option<Notice>,
    pub history: Vec<LinkRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRowView {
    pub id: String,
    pub short_url: String,
    pub original_url: String,
    pub created_at: String,
}
