use std::path::PathBuf;

use crate::gate::RemotePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub log_level: String,
    /// Optional YAML override for the approved-city registry.
    pub cities_path: Option<PathBuf>,
    pub remote_policy: RemotePolicy,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub scraper_base_url: String,
    pub scraper_request_timeout_secs: u64,
    pub scraper_user_agent: String,
    pub scraper_max_concurrent: usize,
    pub scraper_delay_secs: u64,
    pub scraper_max_jobs_per_city: u32,
    pub scraper_cities: Vec<String>,
    pub scraper_search_terms: Vec<String>,
    pub scraper_portals: Vec<String>,
    pub retry_max_attempts: u32,
    pub retry_min_delay_secs: u64,
    pub retry_max_delay_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("cities_path", &self.cities_path)
            .field("remote_policy", &self.remote_policy)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("scraper_base_url", &self.scraper_base_url)
            .field(
                "scraper_request_timeout_secs",
                &self.scraper_request_timeout_secs,
            )
            .field("scraper_user_agent", &self.scraper_user_agent)
            .field("scraper_max_concurrent", &self.scraper_max_concurrent)
            .field("scraper_delay_secs", &self.scraper_delay_secs)
            .field("scraper_max_jobs_per_city", &self.scraper_max_jobs_per_city)
            .field("scraper_cities", &self.scraper_cities)
            .field("scraper_search_terms", &self.scraper_search_terms)
            .field("scraper_portals", &self.scraper_portals)
            .field("retry_max_attempts", &self.retry_max_attempts)
            .field("retry_min_delay_secs", &self.retry_min_delay_secs)
            .field("retry_max_delay_secs", &self.retry_max_delay_secs)
            .finish()
    }
}
