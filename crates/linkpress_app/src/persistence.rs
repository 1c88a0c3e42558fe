//! File-backed persistence for the history store.

use std::path::Path;

use linkpress_core::{BackendError, HistoryBackend, HISTORY_STORAGE_KEY};
use linkpress_engine::StateFile;

/// History backend writing the serialized sequence to one JSON file under
/// the configured state directory, atomically on every mutation.
pub struct FileHistoryBackend {
    file: StateFile,
}

impl FileHistoryBackend {
    pub fn new(state_dir: &Path) -> Self {
        Self {
            file: StateFile::new(state_dir, &format!("{HISTORY_STORAGE_KEY}.json")),
        }
    }
}

impl HistoryBackend for FileHistoryBackend {
    fn load(&mut self) -> Result<Option<String>, BackendError> {
        self.file
            .read()
            .map_err(|err| BackendError::Io(err.to_string()))
    }

    fn store(&mut self, payload: &str) -> Result<(), BackendError> {
        self.file
            .write(payload)
            .map_err(|err| BackendError::Io(err.to_string()))
    }
}
