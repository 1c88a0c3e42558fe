use std::sync::{mpsc, Arc};
use std::thread;

use crate::shorten::{HttpShortener, ShortenSettings, Shortener};
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    Shorten {
        request_id: RequestId,
        url: String,
        token: String,
    },
}

/// Handle to the IO thread. Commands go in over a channel; completion
/// events come back out. Each command runs as its own task, so overlapping
/// submissions resolve independently.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ShortenSettings) -> Self {
        Self::with_shortener(Arc::new(HttpShortener::new(settings)))
    }

    /// Builds the engine around an arbitrary [`Shortener`]; tests inject
    /// scripted implementations here.
    pub fn with_shortener(shortener: Arc<dyn Shortener>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let shortener = shortener.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(shortener.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn enqueue_shorten(
        &self,
        request_id: RequestId,
        url: impl Into<String>,
        token: impl Into<String>,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::Shorten {
            request_id,
            url: url.into(),
            token: token.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn handle_command(
    shortener: &dyn Shortener,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Shorten {
            request_id,
            url,
            token,
        } => {
            let result = shortener.shorten(&url, &token).await;
            let _ = event_tx.send(EngineEvent::ShortenCompleted { request_id, result });
        }
    }
}
