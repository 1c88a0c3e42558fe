//! Linkpress core: pure state machine driving the shortening workflow.
mod effect;
mod history;
mod msg;
mod session;
mod state;
mod update;
mod view_model;

pub use effect::{CopyTarget, Effect};
pub use history::{
    BackendError, HistoryBackend, HistoryStore, MemoryBackend, ShortenedLink, HISTORY_LIMIT,
    HISTORY_STORAGE_KEY,
};
pub use msg::Msg;
pub use session::VerificationSession;
pub use state::{AppState, RequestId, ShortenFailure, ShortenOutcome};
pub use update::update;
pub use view_model::{AppViewModel, LinkRowView, Notice, NoticeLevel};
