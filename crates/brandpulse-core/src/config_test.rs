use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.db_path, PathBuf::from("data/reddit_sentiment.db"));
    assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:8501");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.cache_ttl_secs, 300);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert!(cfg.tracking_path.is_none());
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("BRANDPULSE_DB_PATH", "/var/lib/brandpulse/mentions.db");
    map.insert("BRANDPULSE_BIND_ADDR", "0.0.0.0:9000");
    map.insert("BRANDPULSE_LOG_LEVEL", "debug");
    map.insert("BRANDPULSE_CACHE_TTL_SECS", "60");
    map.insert("BRANDPULSE_TRACKING_PATH", "./config/tracking.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.db_path,
        PathBuf::from("/var/lib/brandpulse/mentions.db")
    );
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:9000");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.cache_ttl_secs, 60);
    assert_eq!(
        cfg.tracking_path,
        Some(PathBuf::from("./config/tracking.yaml"))
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("BRANDPULSE_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDPULSE_BIND_ADDR"),
        "expected InvalidEnvVar(BRANDPULSE_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_cache_ttl() {
    let mut map = HashMap::new();
    map.insert("BRANDPULSE_CACHE_TTL_SECS", "five minutes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDPULSE_CACHE_TTL_SECS"),
        "expected InvalidEnvVar(BRANDPULSE_CACHE_TTL_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_request_timeout() {
    let mut map = HashMap::new();
    map.insert("BRANDPULSE_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BRANDPULSE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BRANDPULSE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn blank_tracking_path_is_ignored() {
    let mut map = HashMap::new();
    map.insert("BRANDPULSE_TRACKING_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.tracking_path.is_none());
}
