//! Terminal front-end pieces: a challenge provider fed by operator input
//! and plain-text rendering of the view model.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use client_logging::client_info;
use linkpress_core::{AppViewModel, NoticeLevel};
use linkpress_engine::{ChallengeCallbacks, ChallengeConfig, ChallengeProvider, ChallengeWidget};

struct SlotEntry {
    instance: u64,
    callbacks: ChallengeCallbacks,
}

/// Challenge provider for a terminal: the widget is a prompt, and the
/// operator pastes the token the real provider issued. Only the callbacks
/// of the live instance can fire; a torn-down instance leaves the slot
/// empty.
#[derive(Clone, Default)]
pub struct ManualChallengeProvider {
    slot: Arc<Mutex<Option<SlotEntry>>>,
    next_instance: Arc<AtomicU64>,
    renders: Arc<AtomicUsize>,
}

struct ManualWidget {
    instance: u64,
    slot: Arc<Mutex<Option<SlotEntry>>>,
}

impl ChallengeWidget for ManualWidget {}

impl Drop for ManualWidget {
    fn drop(&mut self) {
        let mut guard = self.slot.lock().expect("challenge slot lock");
        if guard.as_ref().map(|entry| entry.instance) == Some(self.instance) {
            *guard = None;
        }
    }
}

impl ManualChallengeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a token to the live widget instance. Returns false when no
    /// instance is waiting.
    pub fn submit_token(&self, token: &str) -> bool {
        let guard = self.slot.lock().expect("challenge slot lock");
        match guard.as_ref() {
            Some(entry) => {
                (entry.callbacks.on_verified)(token.to_string());
                true
            }
            None => false,
        }
    }

    /// Reports an expired challenge on the live instance, if any.
    pub fn expire(&self) -> bool {
        let guard = self.slot.lock().expect("challenge slot lock");
        match guard.as_ref() {
            Some(entry) => {
                (entry.callbacks.on_expired)();
                true
            }
            None => false,
        }
    }

    /// Number of widget instances rendered so far.
    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl ChallengeProvider for ManualChallengeProvider {
    fn render(
        &self,
        config: &ChallengeConfig,
        callbacks: ChallengeCallbacks,
    ) -> Box<dyn ChallengeWidget> {
        let instance = self.next_instance.fetch_add(1, Ordering::SeqCst) + 1;
        *self.slot.lock().expect("challenge slot lock") = Some(SlotEntry {
            instance,
            callbacks,
        });
        self.renders.fetch_add(1, Ordering::SeqCst);
        client_info!(
            "Challenge widget {} mounted (site key {}, theme {:?})",
            instance,
            config.site_key,
            config.theme
        );
        Box::new(ManualWidget {
            instance,
            slot: self.slot.clone(),
        })
    }
}

/// Prints the current view: notice, result panel, then history.
pub fn render(view: &AppViewModel) {
    if let Some(notice) = &view.notice {
        match notice.level {
            NoticeLevel::Success => println!("ok: {}", notice.message),
            NoticeLevel::Error => println!("error: {}", notice.message),
        }
    }
    if let Some(result) = &view.result {
        println!("short link: https://{}", result.short_url);
        println!("  original: {}", result.original_url);
    }
    if view.submitting {
        println!("(shortening...)");
    }
    if !view.challenge_ready {
        println!("(verification pending; use `token <value>`)");
    }
}

/// Prints the history, most recent first, numbered from 1.
pub fn render_history(view: &AppViewModel) {
    if view.history.is_empty() {
        println!("history is empty");
        return;
    }
    println!("history ({} links):", view.history.len());
    for (n, row) in view.history.iter().enumerate() {
        println!(
            "  {:2}. {}  <-  {}  ({})",
            n + 1,
            row.short_url,
            row.original_url,
            row.created_at
        );
    }
}
