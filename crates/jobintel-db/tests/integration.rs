//! Offline tests for jobintel-db configuration and result types.
//! These tests do not require a live database connection.

use jobintel_core::{AppConfig, Environment, RemotePolicy};
use jobintel_db::{CityJobCount, DatabaseStats, InsertSummary, PoolConfig};

fn app_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        cities_path: None,
        remote_policy: RemotePolicy::Reject,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        scraper_base_url: "http://localhost:8000".to_string(),
        scraper_request_timeout_secs: 30,
        scraper_user_agent: "ua".to_string(),
        scraper_max_concurrent: 1,
        scraper_delay_secs: 0,
        scraper_max_jobs_per_city: 100,
        scraper_cities: vec!["Pune".to_string()],
        scraper_search_terms: vec!["developer".to_string()],
        scraper_portals: vec!["linkedin".to_string()],
        retry_max_attempts: 3,
        retry_min_delay_secs: 4,
        retry_max_delay_secs: 10,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn empty_database_url_is_reported_before_connecting() {
    let config = AppConfig {
        database_url: "   ".to_string(),
        ..app_config()
    };
    let err = jobintel_db::connect_pool_from_config(&config)
        .await
        .unwrap_err();
    assert!(matches!(err, jobintel_db::DbError::MissingDatabaseUrl));
}

#[test]
fn stats_serialize_with_city_breakdown() {
    let stats = DatabaseStats {
        total_jobs: 5,
        total_companies: 2,
        total_locations: 2,
        remote_jobs: 1,
        jobs_by_city: vec![
            CityJobCount {
                city: "Bengaluru".to_string(),
                jobs: 3,
            },
            CityJobCount {
                city: "Pune".to_string(),
                jobs: 1,
            },
        ],
    };
    let value = serde_json::to_value(&stats).unwrap();
    assert_eq!(value["total_jobs"], 5);
    assert_eq!(value["jobs_by_city"][0]["city"], "Bengaluru");
    assert_eq!(value["jobs_by_city"][1]["jobs"], 1);
}

#[test]
fn insert_summary_defaults_to_zero() {
    let summary = InsertSummary::default();
    assert_eq!(summary.total(), 0);
}
