use std::path::PathBuf;

use linkpress_app::config::{Config, API_URL_VAR, STATE_DIR_VAR, THEME_VAR};
use linkpress_engine::ChallengeTheme;

#[test]
fn defaults_apply_when_nothing_is_set() {
    let config = Config::from_lookup(|_| None).unwrap();
    assert_eq!(config.api_url, "http://localhost:8080");
    assert_eq!(config.site_key, "");
    assert_eq!(config.theme, ChallengeTheme::Auto);
    assert_eq!(config.state_dir, PathBuf::from("."));
}

#[test]
fn overrides_are_picked_up() {
    let config = Config::from_lookup(|key| match key {
        API_URL_VAR => Some("https://shr.ty".to_string()),
        THEME_VAR => Some("dark".to_string()),
        STATE_DIR_VAR => Some("/var/lib/linkpress".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.api_url, "https://shr.ty");
    assert_eq!(config.theme, ChallengeTheme::Dark);
    assert_eq!(config.state_dir, PathBuf::from("/var/lib/linkpress"));
}

#[test]
fn unsupported_theme_fails_fast() {
    let err = Config::from_lookup(|key| match key {
        THEME_VAR => Some("sepia".to_string()),
        _ => None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("sepia"));
}
