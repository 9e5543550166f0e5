use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Gateway route used by a locally running `radar-gateway`.
pub const DEFAULT_DEV_GATEWAY_URL: &str = "http://localhost:3001/api";

/// Upstream API root relayed to by the gateway.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.ahrefs.com/v3/";

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
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

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

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("RADAR_ENV", "development"))?;

    // Production has no default gateway route; the gap only surfaces when a
    // client asks for it through `AppConfig::gateway_url`.
    let gateway_url = match (optional("RADAR_GATEWAY_URL"), &env) {
        (Some(url), _) => Some(url),
        (None, Environment::Development | Environment::Test) => {
            Some(DEFAULT_DEV_GATEWAY_URL.to_string())
        }
        (None, Environment::Production) => None,
    };

    let bind_addr = parse_addr("RADAR_BIND_ADDR", "0.0.0.0:3001")?;
    let log_level = or_default("RADAR_LOG_LEVEL", "info");
    let brands_path = PathBuf::from(or_default("RADAR_BRANDS_PATH", "./config/brands.yaml"));
    let api_key = optional("RADAR_API_KEY");
    let upstream_base_url = or_default("RADAR_UPSTREAM_BASE_URL", DEFAULT_UPSTREAM_BASE_URL);

    let upstream_timeout_secs = parse_u64("RADAR_UPSTREAM_TIMEOUT_SECS", "30")?;
    let connect_timeout_secs = parse_u64("RADAR_CONNECT_TIMEOUT_SECS", "10")?;
    let branch_timeout_secs = parse_u64("RADAR_BRANCH_TIMEOUT_SECS", "30")?;
    let mandatory_timeout_secs = parse_u64("RADAR_MANDATORY_TIMEOUT_SECS", "60")?;
    let user_agent = or_default("RADAR_USER_AGENT", "llm-radar/0.1 (brand-visibility)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        brands_path,
        api_key,
        gateway_url,
        upstream_base_url,
        upstream_timeout_secs,
        connect_timeout_secs,
        branch_timeout_secs,
        mandatory_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "RADAR_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
