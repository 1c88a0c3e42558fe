use client_logging::client_debug;

/// Widget display theme, as understood by the challenge provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChallengeTheme {
    Light,
    Dark,
    #[default]
    Auto,
}

#[derive(Debug, Clone)]
pub struct ChallengeConfig {
    /// Deployment-time site key.
    pub site_key: String,
    pub theme: ChallengeTheme,
}

/// Callbacks a widget instance reports through. The provider invokes
/// exactly one of them per completed/expired/failed challenge cycle.
pub struct ChallengeCallbacks {
    pub on_verified: Box<dyn Fn(String) + Send>,
    pub on_expired: Box<dyn Fn() + Send>,
    pub on_failed: Box<dyn Fn() + Send>,
}

/// A live widget instance. Dropping it destroys the instance; its
/// callbacks die with it, so a torn-down widget can never report stale
/// results.
pub trait ChallengeWidget: Send {}

/// Renders widget instances. The provider's client library cannot swap
/// callbacks on a live instance, hence the full destroy/re-render cycle
/// driven by [`ChallengeHost::sync`].
pub trait ChallengeProvider: Send {
    fn render(
        &self,
        config: &ChallengeConfig,
        callbacks: ChallengeCallbacks,
    ) -> Box<dyn ChallengeWidget>;
}

struct ActiveWidget {
    generation: u64,
    // Held only so the instance is destroyed when replaced.
    _widget: Box<dyn ChallengeWidget>,
}

/// Owns at most one widget instance, keyed by the challenge generation
/// that created it.
pub struct ChallengeHost {
    provider: Box<dyn ChallengeProvider>,
    config: ChallengeConfig,
    callbacks: Box<dyn Fn() -> ChallengeCallbacks + Send>,
    active: Option<ActiveWidget>,
}

impl ChallengeHost {
    /// `callbacks` is invoked once per render: every widget instance gets
    /// its own set.
    pub fn new(
        provider: Box<dyn ChallengeProvider>,
        config: ChallengeConfig,
        callbacks: Box<dyn Fn() -> ChallengeCallbacks + Send>,
    ) -> Self {
        Self {
            provider,
            config,
            callbacks,
            active: None,
        }
    }

    /// Brings the widget in line with `generation`: a no-op while the live
    /// instance matches, otherwise destroy-then-render.
    pub fn sync(&mut self, generation: u64) {
        if let Some(active) = &self.active {
            if active.generation == generation {
                return;
            }
        }
        // Destroy first: the old instance must be gone before the new one
        // mounts, and its callbacks with it.
        self.active = None;
        client_debug!("Rendering challenge widget for generation {}", generation);
        let widget = self.provider.render(&self.config, (self.callbacks)());
        self.active = Some(ActiveWidget {
            generation,
            _widget: widget,
        });
    }

    /// Generation of the live widget, if one is mounted.
    pub fn active_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|active| active.generation)
    }
}
