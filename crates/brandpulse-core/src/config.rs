use crate::app_config::AppConfig;
use crate::ConfigError;

const DEFAULT_DB_PATH: &str = "data/reddit_sentiment.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let db_path = PathBuf::from(or_default("BRANDPULSE_DB_PATH", DEFAULT_DB_PATH));
    let bind_addr = parse_addr("BRANDPULSE_BIND_ADDR", DEFAULT_BIND_ADDR)?;
    let log_level = or_default("BRANDPULSE_LOG_LEVEL", "info");
    let cache_ttl_secs = parse_u64("BRANDPULSE_CACHE_TTL_SECS", "300")?;
    let request_timeout_secs = parse_u64("BRANDPULSE_REQUEST_TIMEOUT_SECS", "30")?;
    let tracking_path = lookup("BRANDPULSE_TRACKING_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRANDPULSE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        db_path,
        bind_addr,
        log_level,
        cache_ttl_secs,
        request_timeout_secs,
        tracking_path,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
