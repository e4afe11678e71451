use crate::app_config::{AppConfig, Environment};
use crate::gate::RemotePolicy;
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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_list = |var: &str, default: &str| -> Result<Vec<String>, ConfigError> {
        let items = split_list(&or_default(var, default));
        if items.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "list must contain at least one entry".to_string(),
            });
        }
        Ok(items)
    };

    let database_url = require("DATABASE_URL")?;

    let env = parse_environment(&or_default("JOBINTEL_ENV", "development"))?;
    let log_level = or_default("JOBINTEL_LOG_LEVEL", "info");
    let cities_path = lookup("JOBINTEL_CITIES_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let remote_policy = parse_remote_policy(&or_default("JOBINTEL_REMOTE_POLICY", "reject"))?;

    let db_max_connections = parse_u32("JOBINTEL_DB_MAX_CONNECTIONS", "10")?;
    let db_min_connections = parse_u32("JOBINTEL_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("JOBINTEL_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let scraper_base_url = or_default("JOBINTEL_SCRAPER_BASE_URL", "http://localhost:8000");
    let scraper_request_timeout_secs = parse_u64("JOBINTEL_SCRAPER_REQUEST_TIMEOUT_SECS", "30")?;
    let scraper_user_agent = or_default(
        "JOBINTEL_SCRAPER_USER_AGENT",
        "jobintel/0.1 (job-market-intelligence)",
    );
    let scraper_max_concurrent = parse_usize("JOBINTEL_SCRAPER_MAX_CONCURRENT", "1")?;
    let scraper_delay_secs = parse_u64("JOBINTEL_SCRAPER_DELAY_SECS", "3")?;
    let scraper_max_jobs_per_city = parse_u32("JOBINTEL_SCRAPER_MAX_JOBS_PER_CITY", "750")?;
    let scraper_cities = parse_list("JOBINTEL_SCRAPER_CITIES", "Bengaluru,Mumbai,Pune,Delhi")?;
    let scraper_search_terms = parse_list(
        "JOBINTEL_SCRAPER_SEARCH_TERMS",
        "software engineer,developer,data analyst,tech",
    )?;
    let scraper_portals = parse_list("JOBINTEL_SCRAPER_PORTALS", "indeed,linkedin")?;

    let retry_max_attempts = parse_u32("JOBINTEL_RETRY_MAX_ATTEMPTS", "3")?;
    if retry_max_attempts == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "JOBINTEL_RETRY_MAX_ATTEMPTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let retry_min_delay_secs = parse_u64("JOBINTEL_RETRY_MIN_DELAY_SECS", "4")?;
    let retry_max_delay_secs = parse_u64("JOBINTEL_RETRY_MAX_DELAY_SECS", "10")?;
    if retry_min_delay_secs > retry_max_delay_secs {
        return Err(ConfigError::InvalidEnvVar {
            var: "JOBINTEL_RETRY_MIN_DELAY_SECS".to_string(),
            reason: format!(
                "min delay {retry_min_delay_secs}s exceeds max delay {retry_max_delay_secs}s"
            ),
        });
    }

    Ok(AppConfig {
        database_url,
        env,
        log_level,
        cities_path,
        remote_policy,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        scraper_base_url,
        scraper_request_timeout_secs,
        scraper_user_agent,
        scraper_max_concurrent,
        scraper_delay_secs,
        scraper_max_jobs_per_city,
        scraper_cities,
        scraper_search_terms,
        scraper_portals,
        retry_max_attempts,
        retry_min_delay_secs,
        retry_max_delay_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "JOBINTEL_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_remote_policy(s: &str) -> Result<RemotePolicy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "reject" => Ok(RemotePolicy::Reject),
        "retain" => Ok(RemotePolicy::RetainFlagged),
        other => Err(ConfigError::InvalidEnvVar {
            var: "JOBINTEL_REMOTE_POLICY".to_string(),
            reason: format!("expected 'reject' or 'retain', got '{other}'"),
        }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
