use std::collections::VecDeque;
use std::sync::mpsc;

use linkpress_core::{update, AppState, AppViewModel, HistoryStore, Msg};
use linkpress_engine::ChallengeCallbacks;

use crate::effects::EffectRunner;

/// Single-threaded event loop around the pure core: owns the state, the
/// history store and the effect runner, and feeds messages through
/// `update` until the queue drains.
pub struct Shell {
    state: AppState,
    history: HistoryStore,
    runner: EffectRunner,
    msg_rx: mpsc::Receiver<Msg>,
}

impl Shell {
    /// `msg_rx` carries messages produced outside the loop, e.g. by the
    /// challenge widget callbacks.
    pub fn new(history: HistoryStore, runner: EffectRunner, msg_rx: mpsc::Receiver<Msg>) -> Self {
        let mut shell = Self {
            state: AppState::new(),
            history,
            runner,
            msg_rx,
        };
        // Mount the initial widget instance for generation zero.
        let generation = shell.state.view(&shell.history).challenge_generation;
        shell.runner.sync_challenge(generation);
        shell
    }

    /// Dispatches `msg` and any follow-up messages its effects produce.
    pub fn handle(&mut self, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, &mut self.history, msg);
            self.state = state;
            for follow_up in self.runner.run(effects) {
                queue.push_back(follow_up);
            }
        }
    }

    /// Drains pending external messages and engine events.
    pub fn poll(&mut self) {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        inbox.extend(self.runner.poll());
        for msg in inbox {
            self.handle(msg);
        }
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view(&self.history)
    }

    /// True when the view changed since the last call; the front-end
    /// re-renders on it.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }
}

/// Callback factory for the challenge host: every widget instance reports
/// into the shell's message channel through its own set.
pub fn challenge_callbacks(
    msg_tx: mpsc::Sender<Msg>,
) -> Box<dyn Fn() -> ChallengeCallbacks + Send> {
    Box::new(move || {
        let verified = msg_tx.clone();
        let expired = msg_tx.clone();
        let failed = msg_tx.clone();
        ChallengeCallbacks {
            on_verified: Box::new(move |token| {
                let _ = verified.send(Msg::ChallengeVerified { token });
            }),
            on_expired: Box::new(move || {
                let _ = expired.send(Msg::ChallengeExpired);
            }),
            on_failed: Box::new(move || {
                let _ = failed.send(Msg::ChallengeFailed);
            }),
        }
    })
}
