//! Linkpress engine: IO seams and effect execution.
mod challenge;
mod clipboard;
mod engine;
mod persist;
mod shorten;
mod types;

pub use challenge::{
    ChallengeCallbacks, ChallengeConfig, ChallengeHost, ChallengeProvider, ChallengeTheme,
    ChallengeWidget,
};
pub use clipboard::{Clipboard, ClipboardError, SystemClipboard};
pub use engine::EngineHandle;
pub use persist::{ensure_state_dir, PersistError, StateFile};
pub use shorten::{HttpShortener, ShortenSettings, Shortener};
pub use types::{EngineEvent, RequestId, ShortenError, ShortenErrorKind, ShortenedTarget};
