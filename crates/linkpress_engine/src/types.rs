use std::fmt;

pub type RequestId = u64;

/// Canonical result of a shortening request. The wire-level field naming
/// variants are folded into this before anything downstream sees them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedTarget {
    /// Host+path of the short link, no scheme.
    pub short_url: String,
    /// The canonical original URL: server-supplied when present, else the
    /// URL that was submitted.
    pub original_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ShortenCompleted {
        request_id: RequestId,
        result: Result<ShortenedTarget, ShortenError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenError {
    pub kind: ShortenErrorKind,
    pub message: String,
}

impl ShortenError {
    pub(crate) fn new(kind: ShortenErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ShortenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenErrorKind {
    /// Non-success status; carries the server's error message when the
    /// body had one.
    Rejected {
        status: u16,
        server_message: Option<String>,
    },
    Timeout,
    Network,
    /// Success status but no usable short link in the body.
    MalformedResponse,
}

impl fmt::Display for ShortenErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShortenErrorKind::Rejected {
                status,
                server_message,
            } => match server_message {
                Some(message) => write!(f, "http status {status} ({message})"),
                None => write!(f, "http status {status}"),
            },
            ShortenErrorKind::Timeout => write!(f, "timeout"),
            ShortenErrorKind::Network => write!(f, "network error"),
            ShortenErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}
