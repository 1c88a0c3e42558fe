use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue exactly one shortening request. No retry: the token is
    /// single-use, so a retry would need a fresh one.
    Shorten {
        request_id: RequestId,
        url: String,
        token: String,
    },
    /// Write `text` to the system clipboard.
    CopyToClipboard { text: String },
    /// Tear down the challenge widget and mount a fresh instance.
    RecreateChallenge { generation: u64 },
}

/// What a copy intent points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyTarget {
    /// The short link shown in the result panel.
    CurrentResult,
    /// A history entry, by id.
    HistoryEntry { id: String },
}
