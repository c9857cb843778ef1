use std::net::SocketAddr;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;
use crate::types::OpenEndedRanges;

pub const DEFAULT_VENUE_API_BASE_URL: &str =
    "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues";

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
/// Every variable has a default; only malformed values are errors.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        parse_value::<SocketAddr>(var, &or_default(var, default))
    };
    let parse_u32 =
        |var: &str, default: &str| parse_value::<u32>(var, &or_default(var, default));
    let parse_u64 =
        |var: &str, default: &str| parse_value::<u64>(var, &or_default(var, default));

    let env = parse_environment(&or_default("DOPC_ENV", "development"))?;

    let bind_addr = parse("DOPC_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("DOPC_LOG_LEVEL", "info");

    // Parsed and checked by `VenueClient::new`.
    let venue_api_base_url = or_default("DOPC_VENUE_API_BASE_URL", DEFAULT_VENUE_API_BASE_URL);

    let venue_request_timeout_secs = parse_u64("DOPC_VENUE_REQUEST_TIMEOUT_SECS", "10")?;
    if venue_request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "DOPC_VENUE_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let venue_user_agent = or_default("DOPC_VENUE_USER_AGENT", "dopc/0.1 (delivery-pricing)");
    let venue_max_retries = parse_u32("DOPC_VENUE_MAX_RETRIES", "2")?;
    let venue_retry_backoff_base_ms = parse_u64("DOPC_VENUE_RETRY_BACKOFF_BASE_MS", "200")?;

    let open_ended_ranges = OpenEndedRanges::from_str(&or_default(
        "DOPC_OPEN_ENDED_RANGES",
        "unavailable",
    ))
    .map_err(|reason| ConfigError::InvalidEnvVar {
        var: "DOPC_OPEN_ENDED_RANGES".to_string(),
        reason,
    })?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        venue_api_base_url,
        venue_request_timeout_secs,
        venue_user_agent,
        venue_max_retries,
        venue_retry_backoff_base_ms,
        open_ended_ranges,
    })
}

fn parse_value<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "DOPC_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
