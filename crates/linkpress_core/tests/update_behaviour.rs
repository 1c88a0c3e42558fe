use std::sync::Once;

use linkpress_core::{
    update, AppState, CopyTarget, Effect, HistoryStore, MemoryBackend, Msg, NoticeLevel,
    ShortenFailure, ShortenedLink,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn new_history() -> (HistoryStore, MemoryBackend) {
    let backend = MemoryBackend::new();
    let store = HistoryStore::open(Box::new(backend.clone()));
    (store, backend)
}

fn link(id: &str, original_url: &str, short_url: &str) -> ShortenedLink {
    ShortenedLink {
        id: id.to_string(),
        original_url: original_url.to_string(),
        short_url: short_url.to_string(),
        created_at: "2026-08-05T12:00:00Z".to_string(),
    }
}

fn verify(state: AppState, history: &mut HistoryStore, token: &str) -> AppState {
    let (state, effects) = update(
        state,
        history,
        Msg::ChallengeVerified {
            token: token.to_string(),
        },
    );
    assert!(effects.is_empty());
    state
}

fn submit(state: AppState, history: &mut HistoryStore, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, history, Msg::InputChanged(input.to_string()));
    update(state, history, Msg::SubmitRequested)
}

#[test]
fn empty_input_never_reaches_network() {
    init_logging();
    let (mut history, _) = new_history();
    for input in ["", "   ", "\t \n"] {
        let (state, effects) = submit(AppState::new(), &mut history, input);
        assert!(effects.is_empty());
        let view = state.view(&history);
        let notice = view.notice.expect("notice");
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Please enter a URL");
        assert!(!view.submitting);
        assert_eq!(view.challenge_generation, 0);
    }
}

#[test]
fn unverified_submission_never_reaches_network() {
    init_logging();
    let (mut history, _) = new_history();
    let (state, effects) = submit(AppState::new(), &mut history, "example.com/long");
    assert!(effects.is_empty());
    let view = state.view(&history);
    assert_eq!(
        view.notice.expect("notice").message,
        "Please complete the verification"
    );
    // No token was spent, so the widget keeps its instance.
    assert_eq!(view.challenge_generation, 0);
}

#[test]
fn verified_submission_emits_single_shorten_effect() {
    init_logging();
    let (mut history, _) = new_history();
    let state = verify(AppState::new(), &mut history, "tok-1");
    let (state, effects) = submit(state, &mut history, "  example.com/a-very-long-path  ");

    assert_eq!(
        effects,
        vec![Effect::Shorten {
            request_id: 1,
            url: "example.com/a-very-long-path".to_string(),
            token: "tok-1".to_string(),
        }]
    );
    let view = state.view(&history);
    assert!(view.submitting);
    // The token is cleared only once the attempt resolves.
    assert!(view.challenge_ready);
}

#[test]
fn successful_resolution_appends_history_and_resets_challenge() {
    init_logging();
    let (mut history, _) = new_history();
    let state = verify(AppState::new(), &mut history, "tok-1");
    let (state, _) = submit(state, &mut history, "example.com/a-very-long-path");

    let (state, effects) = update(
        state,
        &mut history,
        Msg::ShortenResolved {
            request_id: 1,
            result: Ok(link("l-1", "example.com/a-very-long-path", "shr.ty/abc123")),
        },
    );

    assert_eq!(effects, vec![Effect::RecreateChallenge { generation: 1 }]);
    let view = state.view(&history);
    assert!(!view.submitting);
    assert!(!view.challenge_ready);
    assert_eq!(view.challenge_generation, 1);
    assert_eq!(view.input, "");
    let result = view.result.expect("result");
    assert_eq!(result.short_url, "shr.ty/abc123");
    assert_eq!(result.original_url, "example.com/a-very-long-path");
    assert_eq!(view.notice.expect("notice").message, "Your link has been shortened");

    assert_eq!(history.len(), 1);
    let head = &history.links()[0];
    assert_eq!(head.id, "l-1");
    assert_eq!(head.original_url, "example.com/a-very-long-path");
    assert_eq!(head.short_url, "shr.ty/abc123");
}

#[test]
fn rejected_resolution_keeps_history_and_resets_challenge() {
    init_logging();
    let (mut history, _) = new_history();
    let state = verify(AppState::new(), &mut history, "tok-1");
    let (state, _) = submit(state, &mut history, "example.com/bad");

    let (state, effects) = update(
        state,
        &mut history,
        Msg::ShortenResolved {
            request_id: 1,
            result: Err(ShortenFailure::Rejected {
                status: 404,
                message: Some("invalid url".to_string()),
            }),
        },
    );

    assert_eq!(effects, vec![Effect::RecreateChallenge { generation: 1 }]);
    assert!(history.is_empty());
    let view = state.view(&history);
    let notice = view.notice.expect("notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "invalid url");
    assert!(!view.challenge_ready);
    assert_eq!(view.challenge_generation, 1);
    // The rejected input stays in the box for correction.
    assert_eq!(view.input, "example.com/bad");
}

#[test]
fn network_failure_still_resets_session() {
    init_logging();
    let (mut history, _) = new_history();
    let state = verify(AppState::new(), &mut history, "tok-1");
    let (state, _) = submit(state, &mut history, "example.com/x");

    let (state, effects) = update(
        state,
        &mut history,
        Msg::ShortenResolved {
            request_id: 1,
            result: Err(ShortenFailure::Network),
        },
    );

    assert_eq!(effects, vec![Effect::RecreateChallenge { generation: 1 }]);
    let view = state.view(&history);
    assert!(!view.challenge_ready);
    assert_eq!(view.notice.expect("notice").message, "Failed to shorten URL");
}

#[test]
fn expiry_clears_token_without_recreating_widget() {
    init_logging();
    let (mut history, _) = new_history();
    let state = verify(AppState::new(), &mut history, "tok-1");
    let (state, effects) = update(state, &mut history, Msg::ChallengeExpired);
    assert!(effects.is_empty());
    let view = state.view(&history);
    assert!(!view.challenge_ready);
    assert_eq!(view.challenge_generation, 0);
}

#[test]
fn reverification_before_use_replaces_token() {
    init_logging();
    let (mut history, _) = new_history();
    let state = verify(AppState::new(), &mut history, "tok-1");
    let state = verify(state, &mut history, "tok-2");
    let (_, effects) = submit(state, &mut history, "example.com/x");
    assert_eq!(
        effects,
        vec![Effect::Shorten {
            request_id: 1,
            url: "example.com/x".to_string(),
            token: "tok-2".to_string(),
        }]
    );
}

#[test]
fn overlapping_submissions_carry_their_own_tokens() {
    init_logging();
    let (mut history, _) = new_history();
    let state = verify(AppState::new(), &mut history, "tok-1");
    let (state, first) = submit(state, &mut history, "example.com/first");
    // The provider re-verified while the first request was in flight.
    let state = verify(state, &mut history, "tok-2");
    let (state, second) = submit(state, &mut history, "example.com/second");

    assert_eq!(
        first,
        vec![Effect::Shorten {
            request_id: 1,
            url: "example.com/first".to_string(),
            token: "tok-1".to_string(),
        }]
    );
    assert_eq!(
        second,
        vec![Effect::Shorten {
            request_id: 2,
            url: "example.com/second".to_string(),
            token: "tok-2".to_string(),
        }]
    );

    // The newer request resolves first and owns the result panel.
    let (state, _) = update(
        state,
        &mut history,
        Msg::ShortenResolved {
            request_id: 2,
            result: Ok(link("l-2", "example.com/second", "shr.ty/bbb222")),
        },
    );
    // The older one lands late: history still grows, the panel is untouched.
    let (state, _) = update(
        state,
        &mut history,
        Msg::ShortenResolved {
            request_id: 1,
            result: Ok(link("l-1", "example.com/first", "shr.ty/aaa111")),
        },
    );

    let view = state.view(&history);
    assert_eq!(view.result.expect("result").short_url, "shr.ty/bbb222");
    assert!(!view.submitting);
    // One reset per resolved attempt.
    assert_eq!(view.challenge_generation, 2);
    assert_eq!(history.len(), 2);
    assert_eq!(history.links()[0].id, "l-1");
    assert_eq!(history.links()[1].id, "l-2");
}

#[test]
fn copy_current_result_prepends_scheme() {
    init_logging();
    let (mut history, _) = new_history();
    let state = verify(AppState::new(), &mut history, "tok-1");
    let (state, _) = submit(state, &mut history, "example.com/x");
    let (state, _) = update(
        state,
        &mut history,
        Msg::ShortenResolved {
            request_id: 1,
            result: Ok(link("l-1", "example.com/x", "shr.ty/abc123")),
        },
    );

    let (state, effects) = update(
        state,
        &mut history,
        Msg::CopyRequested {
            target: CopyTarget::CurrentResult,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "https://shr.ty/abc123".to_string(),
        }]
    );

    let (state, effects) = update(
        state,
        &mut history,
        Msg::CopyRequested {
            target: CopyTarget::HistoryEntry {
                id: "l-1".to_string(),
            },
        },
    );
    assert_eq!(
        effects,
        vec![Effect::CopyToClipboard {
            text: "https://shr.ty/abc123".to_string(),
        }]
    );

    // A copy of something that no longer exists does nothing.
    let (_, effects) = update(
        state,
        &mut history,
        Msg::CopyRequested {
            target: CopyTarget::HistoryEntry {
                id: "gone".to_string(),
            },
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn copy_resolution_surfaces_notice() {
    init_logging();
    let (mut history, _) = new_history();
    let (state, _) = update(
        AppState::new(),
        &mut history,
        Msg::CopyResolved { result: Ok(()) },
    );
    assert_eq!(
        state.view(&history).notice.expect("notice").message,
        "Link copied to clipboard"
    );

    let (state, _) = update(
        state,
        &mut history,
        Msg::CopyResolved {
            result: Err("denied".to_string()),
        },
    );
    let notice = state.view(&history).notice.expect("notice");
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.message, "Failed to copy link");
}

#[test]
fn delete_and_clear_mutate_history() {
    init_logging();
    let (mut history, _) = new_history();
    history.append(link("l-1", "example.com/a", "shr.ty/a"));
    history.append(link("l-2", "example.com/b", "shr.ty/b"));

    let state = AppState::new();
    let (state, effects) = update(
        state,
        &mut history,
        Msg::LinkDeleted {
            id: "l-1".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(history.len(), 1);
    assert_eq!(history.links()[0].id, "l-2");

    let (_, effects) = update(state, &mut history, Msg::HistoryCleared);
    assert!(effects.is_empty());
    assert!(history.is_empty());
}
