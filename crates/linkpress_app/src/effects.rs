use chrono::Utc;
use client_logging::{client_info, client_warn};
use linkpress_core::{Effect, Msg, ShortenFailure, ShortenedLink};
use linkpress_engine::{
    ChallengeHost, Clipboard, EngineEvent, EngineHandle, ShortenError, ShortenErrorKind,
    ShortenedTarget,
};
use uuid::Uuid;

/// Executes effects against the engine, clipboard and challenge host, and
/// drains engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn Clipboard>,
    challenge: ChallengeHost,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, clipboard: Box<dyn Clipboard>, challenge: ChallengeHost) -> Self {
        Self {
            engine,
            clipboard,
            challenge,
        }
    }

    /// Runs `effects`; synchronous outcomes (clipboard) come back as
    /// follow-up messages.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::Shorten {
                    request_id,
                    url,
                    token,
                } => {
                    client_info!("Dispatching shorten request {} url={}", request_id, url);
                    self.engine.enqueue_shorten(request_id, url, token);
                }
                Effect::CopyToClipboard { text } => {
                    let result = self
                        .clipboard
                        .write_text(&text)
                        .map_err(|err| err.to_string());
                    follow_ups.push(Msg::CopyResolved { result });
                }
                Effect::RecreateChallenge { generation } => {
                    self.challenge.sync(generation);
                }
            }
        }
        follow_ups
    }

    /// Completion events from the engine, as messages for the update loop.
    pub fn poll(&mut self) -> Vec<Msg> {
        let mut msgs = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            match event {
                EngineEvent::ShortenCompleted { request_id, result } => {
                    let result = match result {
                        Ok(target) => Ok(new_link(target)),
                        Err(err) => {
                            client_warn!("Shorten request {} failed: {}", request_id, err);
                            Err(map_failure(err))
                        }
                    };
                    msgs.push(Msg::ShortenResolved { request_id, result });
                }
            }
        }
        msgs
    }

    /// Brings the challenge widget in line with the session generation.
    pub fn sync_challenge(&mut self, generation: u64) {
        self.challenge.sync(generation);
    }
}

/// The id and creation timestamp are stamped here, at the boundary where
/// the clock and id generator live.
fn new_link(target: ShortenedTarget) -> ShortenedLink {
    ShortenedLink {
        id: Uuid::new_v4().to_string(),
        original_url: target.original_url,
        short_url: target.short_url,
        created_at: Utc::now().to_rfc3339(),
    }
}

fn map_failure(err: ShortenError) -> ShortenFailure {
    match err.kind {
        ShortenErrorKind::Rejected {
            status,
            server_message,
        } => ShortenFailure::Rejected {
            status,
            message: server_message,
        },
        ShortenErrorKind::Timeout => ShortenFailure::Timeout,
        ShortenErrorKind::Network => ShortenFailure::Network,
        ShortenErrorKind::MalformedResponse => ShortenFailure::MalformedResponse,
    }
}
