use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_AIRTABLE_API_URL: &str = "https://api.airtable.com/v0/";
const DEFAULT_RETELL_API_URL: &str = "https://api.retellai.com/";

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
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the real environment so it can be tested with a
/// plain `HashMap` lookup.
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

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let airtable_api_key = require("AIRTABLE_API_KEY")?;
    let airtable_base_id = require("AIRTABLE_BASE_ID")?;
    let airtable_table_name = or_default("AIRTABLE_TABLE_NAME", "Members");
    let airtable_api_url = or_default("AIRTABLE_API_URL", DEFAULT_AIRTABLE_API_URL);

    let retell_api_key = optional("RETELL_API_KEY");
    let retell_agent_id = optional("RETELL_AGENT_ID");
    let retell_api_url = or_default("RETELL_API_URL", DEFAULT_RETELL_API_URL);

    let env = parse_environment(&or_default("KOLOS_ENV", "development"))?;
    let bind_addr = parse_addr("KOLOS_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("KOLOS_LOG_LEVEL", "info");
    let http_timeout_secs = parse_u64("KOLOS_HTTP_TIMEOUT_SECS", "30")?;
    let event_buffer = parse_usize("KOLOS_EVENT_BUFFER", "64")?;

    if event_buffer == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "KOLOS_EVENT_BUFFER".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        airtable_api_key,
        airtable_base_id,
        airtable_table_name,
        airtable_api_url,
        retell_api_key,
        retell_agent_id,
        retell_api_url,
        http_timeout_secs,
        event_buffer,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "KOLOS_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
