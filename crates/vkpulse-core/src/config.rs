use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Smallest pause allowed between two window requests.
const MIN_INTER_WINDOW_DELAY_MS: u64 = 1_000;

/// Largest `count` the `newsfeed.search` method accepts.
const MAX_PAGE_SIZE: u32 = 200;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
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
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("VKPULSE_ENV", "development"))?;
    let log_level = or_default("VKPULSE_LOG_LEVEL", "info");
    let access_token = optional("VK_ACCESS_TOKEN");
    let api_base_url = or_default("VKPULSE_API_BASE_URL", "https://api.vk.com/method/");
    let api_version = or_default("VKPULSE_API_VERSION", "5.131");

    let page_size = parse_u32("VKPULSE_PAGE_SIZE", "200")?;
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidEnvVar {
            var: "VKPULSE_PAGE_SIZE".to_string(),
            reason: format!("must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
        });
    }

    let window_days = parse_u32("VKPULSE_WINDOW_DAYS", "30")?;
    if window_days == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VKPULSE_WINDOW_DAYS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let inter_window_delay_ms = parse_u64("VKPULSE_INTER_WINDOW_DELAY_MS", "3000")?;
    if inter_window_delay_ms < MIN_INTER_WINDOW_DELAY_MS {
        return Err(ConfigError::InvalidEnvVar {
            var: "VKPULSE_INTER_WINDOW_DELAY_MS".to_string(),
            reason: format!(
                "must be at least {MIN_INTER_WINDOW_DELAY_MS} ms, got {inter_window_delay_ms}"
            ),
        });
    }

    let request_timeout_secs = parse_u64("VKPULSE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("VKPULSE_USER_AGENT", "vkpulse/0.1 (newsfeed-analytics)");
    let classifier_url = optional("VKPULSE_CLASSIFIER_URL");

    let classifier_batch_size = parse_usize("VKPULSE_CLASSIFIER_BATCH_SIZE", "32")?;
    if classifier_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VKPULSE_CLASSIFIER_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        log_level,
        access_token,
        api_base_url,
        api_version,
        page_size,
        window_days,
        inter_window_delay_ms,
        request_timeout_secs,
        user_agent,
        classifier_url,
        classifier_batch_size,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VKPULSE_ENV".to_string(),
            reason: format!("expected development, test or production, got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
