use client_logging::{client_info, client_warn};

use crate::view_model::Notice;
use crate::{AppState, CopyTarget, Effect, HistoryStore, Msg, ShortenOutcome};

/// Applies a message to the state and the history store, returning any
/// effects for the shell to run.
///
/// This is the submission orchestrator: it validates input and verification
/// state before emitting a network effect, interprets resolutions, and owns
/// the one-reset-per-attempt rule for the verification session.
pub fn update(
    mut state: AppState,
    history: &mut HistoryStore,
    msg: Msg,
) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(input) => {
            state.set_input(input);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitRequested => {
            let trimmed = state.input().trim().to_string();
            if trimmed.is_empty() {
                state.set_notice(Notice::error("Please enter a URL"));
                state.mark_dirty();
                return (state, Vec::new());
            }
            let token = match state.session().token() {
                Some(token) => token.to_string(),
                None => {
                    state.set_notice(Notice::error("Please complete the verification"));
                    state.mark_dirty();
                    return (state, Vec::new());
                }
            };
            // The token is not discarded here: it is spent by the attempt
            // and cleared once the attempt resolves.
            let request_id = state.begin_request();
            client_info!("Submitting shorten request {} url={}", request_id, trimmed);
            state.mark_dirty();
            vec![Effect::Shorten {
                request_id,
                url: trimmed,
                token,
            }]
        }
        Msg::ChallengeVerified { token } => {
            state.session_mut().on_verified(token);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ChallengeExpired => {
            state.session_mut().on_expired();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ChallengeFailed => {
            state.session_mut().on_error();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ShortenResolved { request_id, result } => {
            let newest = state.finish_request(request_id);
            // Exactly one reset per attempt that reached the network. The
            // widget must be re-mounted: the spent token is dead either way.
            state.session_mut().reset();
            let generation = state.session().generation();
            match result {
                Ok(link) => {
                    let outcome = ShortenOutcome {
                        short_url: link.short_url.clone(),
                        original_url: link.original_url.clone(),
                    };
                    history.append(link);
                    if newest {
                        state.set_result(Some(outcome));
                        state.set_input(String::new());
                        state.set_notice(Notice::success("Your link has been shortened"));
                    } else {
                        client_info!(
                            "Request {} resolved after a newer submission; history updated only",
                            request_id
                        );
                    }
                }
                Err(failure) => {
                    client_warn!("Shorten request {} failed: {}", request_id, failure);
                    if newest {
                        state.set_notice(Notice::error(failure.user_message()));
                    }
                }
            }
            state.mark_dirty();
            vec![Effect::RecreateChallenge { generation }]
        }
        Msg::CopyRequested { target } => {
            let short_url = match &target {
                CopyTarget::CurrentResult => state
                    .result_short_url()
                    .map(|short_url| short_url.to_string()),
                CopyTarget::HistoryEntry { id } => {
                    history.short_url(id).map(|short_url| short_url.to_string())
                }
            };
            match short_url {
                Some(short_url) => vec![Effect::CopyToClipboard {
                    text: format!("https://{short_url}"),
                }],
                None => {
                    client_warn!("Copy requested for a link that no longer exists");
                    Vec::new()
                }
            }
        }
        Msg::CopyResolved { result } => {
            match result {
                Ok(()) => state.set_notice(Notice::success("Link copied to clipboard")),
                Err(err) => {
                    client_warn!("Clipboard write failed: {}", err);
                    state.set_notice(Notice::error("Failed to copy link"));
                }
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::LinkDeleted { id } => {
            history.remove(&id);
            state.mark_dirty();
            Vec::new()
        }
        Msg::HistoryCleared => {
            history.clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
