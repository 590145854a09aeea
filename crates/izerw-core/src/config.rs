use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Upper bound for `IZERW_PAGE_SIZE` and `IZERW_FETCH_LIMIT`; Shopify rejects
/// `limit` values above 250.
const MAX_LIMIT: u32 = 250;

/// Load application configuration, letting `overrides` shadow individual
/// environment variables (used for CLI flags).
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// Overridden values go through the same parsing and validation as the
/// environment, so `--page-size 0` fails exactly like `IZERW_PAGE_SIZE=0`.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_with_overrides(
    overrides: &[(&str, String)],
) -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    build_app_config(with_overrides(overrides, |key| std::env::var(key)))
}

/// Wraps `lookup` so that keys named in `overrides` resolve to their value.
fn with_overrides<'a, F>(
    overrides: &'a [(&'a str, String)],
    lookup: F,
) -> impl Fn(&str) -> Result<String, std::env::VarError> + 'a
where
    F: Fn(&str) -> Result<String, std::env::VarError> + 'a,
{
    move |key| {
        overrides
            .iter()
            .find(|(name, _)| *name == key)
            .map_or_else(|| lookup(key), |(_, value)| Ok(value.clone()))
    }
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let parse_limit = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = parse_u32(var, default)?;
        if value == 0 || value > MAX_LIMIT {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be between 1 and {MAX_LIMIT}, got {value}"),
            });
        }
        Ok(value)
    };

    let fixture_path = optional("IZERW_FIXTURE_PATH").map(PathBuf::from);
    let shop_url = optional("IZERW_SHOP_URL");
    if shop_url.is_none() && fixture_path.is_none() {
        return Err(ConfigError::MissingEnvVar("IZERW_SHOP_URL".to_string()));
    }

    let env = parse_environment(&or_default("IZERW_ENV", "development"));
    let log_level = or_default("IZERW_LOG_LEVEL", "info");

    let page_size = parse_limit("IZERW_PAGE_SIZE", "12")?;
    let request_timeout_secs = parse_u64("IZERW_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("IZERW_USER_AGENT", "izerw-catalog/0.1");
    let fetch_limit = parse_limit("IZERW_FETCH_LIMIT", "250")?;
    let inter_request_delay_ms = parse_u64("IZERW_INTER_REQUEST_DELAY_MS", "250")?;
    let max_retries = parse_u32("IZERW_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("IZERW_RETRY_BACKOFF_BASE_SECS", "2")?;
    let cache_ttl_secs = parse_u64("IZERW_CACHE_TTL_SECS", "300")?;

    Ok(AppConfig {
        env,
        log_level,
        shop_url,
        fixture_path,
        page_size,
        request_timeout_secs,
        user_agent,
        fetch_limit,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
        cache_ttl_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
