use std::path::PathBuf;

use crate::app_config::{AppConfig, PLACEHOLDER_EBIRD_API_KEY};
use crate::ConfigError;

/// eBird accepts lookback windows of 1 to 30 days.
pub const MAX_DAYS_BACK: u32 = 30;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an unparseable value.
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
/// Returns `ConfigError` if a variable is set to an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. Parsing is decoupled from the process
/// environment so it can be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let ebird_api_key = or_default("EBIRD_API_KEY", PLACEHOLDER_EBIRD_API_KEY);
    let ebird_base_url = or_default("RAREBIRDS_EBIRD_BASE_URL", "https://api.ebird.org/v2");
    let wiki_base_url = or_default(
        "RAREBIRDS_WIKI_BASE_URL",
        "https://en.wikipedia.org/w/api.php",
    );

    let region_code = or_default("RAREBIRDS_REGION_CODE", "US-NY");
    let region_name = or_default("RAREBIRDS_REGION_NAME", "New York");
    let days_back = parse_days_back(&or_default("RAREBIRDS_DAYS_BACK", "7"))?;
    let output_path = PathBuf::from(or_default("RAREBIRDS_OUTPUT_PATH", "data/birds.json"));

    let image_limit = parse_usize("RAREBIRDS_IMAGE_LIMIT", "30")?;
    let image_delay_ms = parse_u64("RAREBIRDS_IMAGE_DELAY_MS", "100")?;
    let request_timeout_secs = parse_u64("RAREBIRDS_REQUEST_TIMEOUT_SECS", "30")?;
    let image_timeout_secs = parse_u64("RAREBIRDS_IMAGE_TIMEOUT_SECS", "5")?;
    let user_agent = or_default(
        "RAREBIRDS_USER_AGENT",
        "rarebirds/0.1 (notable-bird-snapshot)",
    );
    let log_level = or_default("RAREBIRDS_LOG_LEVEL", "warn");

    Ok(AppConfig {
        ebird_api_key,
        ebird_base_url,
        wiki_base_url,
        region_code,
        region_name,
        days_back,
        output_path,
        image_limit,
        image_delay_ms,
        request_timeout_secs,
        image_timeout_secs,
        user_agent,
        log_level,
    })
}

/// Parse a lookback window, rejecting anything outside `1..=30`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for non-numeric or out-of-range input.
pub fn parse_days_back(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "RAREBIRDS_DAYS_BACK".to_string(),
        reason,
    };
    let days = raw.parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    if (1..=MAX_DAYS_BACK).contains(&days) {
        Ok(days)
    } else {
        Err(invalid(format!("{days} is outside 1..={MAX_DAYS_BACK}")))
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
