use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Largest page size the highlights upstream accepts.
const MAX_HIGHLIGHTS_LIMIT: u32 = 50;

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
/// Credentials (`YOUTUBE_API_KEY`, `YOUTUBE_PLAYLIST_ID`) stay optional here:
/// their absence is reported by the highlights endpoint on first use so the
/// standings side can run without them.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
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

    let env = parse_environment(&or_default("CPBL_ENV", "development"))?;
    let bind_addr = parse_addr("CPBL_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("CPBL_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("CPBL_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "CPBL_USER_AGENT",
        "cpbl-digest/0.1 (+standings; highlights)",
    );

    let standings_url = or_default(
        "CPBL_STANDINGS_URL",
        "https://www.cpbl.com.tw/standings/season",
    );
    let standings_base_url = or_default("CPBL_STANDINGS_BASE_URL", "https://www.cpbl.com.tw");

    let youtube_api_key = optional("YOUTUBE_API_KEY");
    let youtube_playlist_id = optional("YOUTUBE_PLAYLIST_ID");
    let youtube_api_base_url = or_default(
        "CPBL_YOUTUBE_API_BASE_URL",
        "https://www.googleapis.com/youtube/v3/",
    );

    let highlights_default_limit = parse_u32("CPBL_HIGHLIGHTS_DEFAULT_LIMIT", "24")?;
    if !(1..=MAX_HIGHLIGHTS_LIMIT).contains(&highlights_default_limit) {
        return Err(ConfigError::InvalidEnvVar {
            var: "CPBL_HIGHLIGHTS_DEFAULT_LIMIT".to_string(),
            reason: format!("must be between 1 and {MAX_HIGHLIGHTS_LIMIT}"),
        });
    }
    let highlights_default_days = parse_u32("CPBL_HIGHLIGHTS_DEFAULT_DAYS", "30")?;
    let highlights_max_window_days = parse_u32("CPBL_HIGHLIGHTS_MAX_WINDOW_DAYS", "730")?;
    let highlights_endpoint = or_default(
        "CPBL_HIGHLIGHTS_ENDPOINT",
        "http://127.0.0.1:3000/api/highlights",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        request_timeout_secs,
        user_agent,
        standings_url,
        standings_base_url,
        youtube_api_key,
        youtube_playlist_id,
        youtube_api_base_url,
        highlights_default_limit,
        highlights_default_days,
        highlights_max_window_days,
        highlights_endpoint,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CPBL_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
