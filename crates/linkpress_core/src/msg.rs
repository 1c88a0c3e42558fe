use crate::{RequestId, ShortenFailure, ShortenedLink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the URL input box.
    InputChanged(String),
    /// User asked to shorten the current input.
    SubmitRequested,
    /// Challenge widget produced a token.
    ChallengeVerified { token: String },
    /// Challenge widget expired its token; the widget re-renders itself.
    ChallengeExpired,
    /// Challenge widget failed; the widget re-renders itself.
    ChallengeFailed,
    /// A shortening attempt resolved, success or failure.
    ShortenResolved {
        request_id: RequestId,
        result: Result<ShortenedLink, ShortenFailure>,
    },
    /// User asked to copy a short link to the clipboard.
    CopyRequested { target: crate::CopyTarget },
    /// The clipboard write resolved.
    CopyResolved { result: Result<(), String> },
    /// User deleted one history entry.
    LinkDeleted { id: String },
    /// User cleared the whole history.
    HistoryCleared,
    /// Fallback for placeholder wiring.
    NoOp,
}
