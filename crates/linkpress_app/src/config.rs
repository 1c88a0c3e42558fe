//! Deployment-time configuration, read from the environment.

use std::path::PathBuf;

use anyhow::bail;
use linkpress_engine::ChallengeTheme;

pub const API_URL_VAR: &str = "LINKPRESS_API_URL";
pub const SITE_KEY_VAR: &str = "LINKPRESS_SITE_KEY";
pub const THEME_VAR: &str = "LINKPRESS_THEME";
pub const STATE_DIR_VAR: &str = "LINKPRESS_STATE_DIR";

const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the shortening service.
    pub api_url: String,
    /// Site key handed to the challenge provider.
    pub site_key: String,
    pub theme: ChallengeTheme,
    /// Directory holding the persisted history file.
    pub state_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary lookup, so tests stay clear of
    /// process-global environment mutation.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup(API_URL_VAR)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let site_key = lookup(SITE_KEY_VAR).unwrap_or_default();
        let theme = match lookup(THEME_VAR).as_deref() {
            None | Some("") | Some("auto") => ChallengeTheme::Auto,
            Some("light") => ChallengeTheme::Light,
            Some("dark") => ChallengeTheme::Dark,
            Some(other) => bail!("{THEME_VAR} must be light, dark or auto, got {other:?}"),
        };
        let state_dir = lookup(STATE_DIR_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            api_url,
            site_key,
            theme,
            state_dir,
        })
    }
}
