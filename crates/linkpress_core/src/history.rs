use std::sync::{Arc, Mutex};

use client_logging::client_warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of links retained; older entries are evicted first.
pub const HISTORY_LIMIT: usize = 50;

/// Namespace key under which the serialized history is persisted.
pub const HISTORY_STORAGE_KEY: &str = "linkpress-history";

/// One successfully shortened link, as created on this machine.
///
/// Field names serialize in camelCase so the persisted JSON array
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenedLink {
    /// Client-generated unique identifier.
    pub id: String,
    /// The user-submitted URL, trimmed.
    pub original_url: String,
    /// Host+path returned by the service, no scheme.
    pub short_url: String,
    /// ISO-8601 creation timestamp, stamped client-side.
    pub created_at: String,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("history backend io: {0}")]
    Io(String),
}

/// Storage seam for the history store. Implementations deal in the
/// serialized payload only; (de)serialization stays in the store.
pub trait HistoryBackend: Send {
    /// Returns the persisted payload, or `None` if nothing was saved yet.
    fn load(&mut self) -> Result<Option<String>, BackendError>;
    /// Replaces the persisted payload.
    fn store(&mut self, payload: &str) -> Result<(), BackendError>;
}

/// In-memory backend, shared behind an `Arc` so tests can inspect writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    cell: Arc<Mutex<Option<String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current persisted payload, if any.
    pub fn payload(&self) -> Option<String> {
        self.cell.lock().expect("memory backend lock").clone()
    }

    /// Seeds the backend as if a previous session had persisted `payload`.
    pub fn seed(&self, payload: &str) {
        *self.cell.lock().expect("memory backend lock") = Some(payload.to_string());
    }
}

impl HistoryBackend for MemoryBackend {
    fn load(&mut self) -> Result<Option<String>, BackendError> {
        Ok(self.cell.lock().expect("memory backend lock").clone())
    }

    fn store(&mut self, payload: &str) -> Result<(), BackendError> {
        *self.cell.lock().expect("memory backend lock") = Some(payload.to_string());
        Ok(())
    }
}

/// Bounded, ordered record of links created on this machine,
/// most-recent-first, re-persisted through the backend on every mutation.
pub struct HistoryStore {
    links: Vec<ShortenedLink>,
    backend: Box<dyn HistoryBackend>,
}

impl HistoryStore {
    /// Loads the persisted sequence. Absent or malformed state yields an
    /// empty store; corrupted local data must never block the application.
    pub fn open(mut backend: Box<dyn HistoryBackend>) -> Self {
        let links = match backend.load() {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<ShortenedLink>>(&payload) {
                Ok(links) => links,
                Err(err) => {
                    client_warn!("Discarding unparseable history state: {}", err);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                client_warn!("Failed to load history state: {}", err);
                Vec::new()
            }
        };
        Self {
            links,
            backend,
        }
    }

    pub fn links(&self) -> &[ShortenedLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Prepends `link` and truncates to [`HISTORY_LIMIT`] entries.
    pub fn append(&mut self, link: ShortenedLink) {
        self.links.insert(0, link);
        self.links.truncate(HISTORY_LIMIT);
        self.persist();
    }

    /// Removes the entry with matching id. A missing id is a no-op.
    pub fn remove(&mut self, id: &str) {
        let before = self.links.len();
        self.links.retain(|link| link.id != id);
        if self.links.len() != before {
            self.persist();
        }
    }

    /// Empties the sequence.
    pub fn clear(&mut self) {
        self.links.clear();
        self.persist();
    }

    /// Short URL for the entry with matching id, if present.
    pub fn short_url(&self, id: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.id == id)
            .map(|link| link.short_url.as_str())
    }

    fn persist(&mut self) {
        let payload = match serde_json::to_string(&self.links) {
            Ok(payload) => payload,
            Err(err) => {
                client_warn!("Failed to serialize history state: {}", err);
                return;
            }
        };
        if let Err(err) = self.backend.store(&payload) {
            // The in-memory sequence stays authoritative for this session.
            client_warn!("Failed to persist history state: {}", err);
        }
    }
}
