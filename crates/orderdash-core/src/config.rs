use crate::app_config::{AppConfig, Environment, MetricsConfig};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, with no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let source_url = require("ORDERDASH_SOURCE_URL")?;

    let env = parse_environment(&or_default("ORDERDASH_ENV", "development"));
    let bind_addr = parse_addr("ORDERDASH_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("ORDERDASH_LOG_LEVEL", "info");

    let source_timeout_secs = parse_u64("ORDERDASH_SOURCE_TIMEOUT_SECS", "30")?;
    let source_cache_minutes =
        Some(parse_u64("ORDERDASH_SOURCE_CACHE_MINUTES", "10")?).filter(|m| *m > 0);

    let source_retry_count = parse_u32("ORDERDASH_SOURCE_RETRY_COUNT", "3")?;
    if source_retry_count == 0 {
        return Err(invalid(
            "ORDERDASH_SOURCE_RETRY_COUNT",
            "must allow at least one attempt".to_string(),
        ));
    }
    let source_retry_backoff_ms = parse_u64("ORDERDASH_SOURCE_RETRY_BACKOFF_MS", "1000")?;

    let source_user_agent = or_default("ORDERDASH_SOURCE_USER_AGENT", "orderdash/0.1 (order-metrics)");
    let source_api_token = lookup("ORDERDASH_SOURCE_API_TOKEN")
        .ok()
        .filter(|t| !t.trim().is_empty());

    let source_max_pages = parse_usize("ORDERDASH_SOURCE_MAX_PAGES", "1")?.max(1);
    let source_page_delay_ms = parse_u64("ORDERDASH_SOURCE_PAGE_DELAY_MS", "500")?;

    let usd_brl_rate = parse_exchange_rate(&or_default("ORDERDASH_USD_BRL_RATE", "5.0"))
        .map_err(|reason| invalid("ORDERDASH_USD_BRL_RATE", reason))?;
    let shipping_skus = parse_sku_list(&or_default("ORDERDASH_SHIPPING_SKUS", "SHIPPING"));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        source_url,
        source_timeout_secs,
        source_cache_minutes,
        source_retry_count,
        source_retry_backoff_ms,
        source_user_agent,
        source_api_token,
        source_max_pages,
        source_page_delay_ms,
        metrics: MetricsConfig {
            usd_brl_rate,
            shipping_skus,
        },
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

fn parse_exchange_rate(raw: &str) -> Result<f64, String> {
    let rate = raw.trim().parse::<f64>().map_err(|e| e.to_string())?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(format!("exchange rate must be a positive number, got {raw}"));
    }
    Ok(rate)
}

/// Splits a comma-separated SKU list, dropping blanks. SKUs are matched
/// exactly, so no case folding happens here.
fn parse_sku_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
