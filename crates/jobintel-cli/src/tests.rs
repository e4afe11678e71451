use std::sync::Arc;

use clap::Parser;
use jobintel_core::{
    AppConfig, Environment, LocationClassifier, RawJob, RejectionCategory, RemotePolicy,
    ValidationGate,
};
use jobintel_scraper::Portal;

use super::*;

fn app_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        cities_path: None,
        remote_policy: RemotePolicy::Reject,
        db_max_connections: 10,
        db_min_connections: 1,
        db_acquire_timeout_secs: 10,
        scraper_base_url: "http://localhost:8000".to_string(),
        scraper_request_timeout_secs: 30,
        scraper_user_agent: "ua".to_string(),
        scraper_max_concurrent: 1,
        scraper_delay_secs: 0,
        scraper_max_jobs_per_city: 750,
        scraper_cities: vec!["Bengaluru".to_string(), "Pune".to_string()],
        scraper_search_terms: vec!["developer".to_string()],
        scraper_portals: vec!["indeed".to_string(), "linkedin".to_string()],
        retry_max_attempts: 3,
        retry_min_delay_secs: 4,
        retry_max_delay_secs: 10,
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["jobintel"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn collect_defaults_to_full_plan() {
    let cli = Cli::try_parse_from(["jobintel", "collect"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Collect {
            city: None,
            portal: None,
            dry_run: false
        })
    ));
}

#[test]
fn collect_accepts_city_portal_and_dry_run() {
    let cli = Cli::try_parse_from([
        "jobintel", "collect", "--city", "Pune", "--portal", "indeed", "--dry-run",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Collect {
            city: Some(ref c),
            portal: Some(ref p),
            dry_run: true
        }) if c == "Pune" && p == "indeed"
    ));
}

#[test]
fn clean_requires_input() {
    assert!(Cli::try_parse_from(["jobintel", "clean"]).is_err());
    let cli = Cli::try_parse_from(["jobintel", "clean", "--input", "jobs.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Clean { ref input, dry_run: false }) if input.to_str() == Some("jobs.json")
    ));
}

#[test]
fn cleanup_defaults_to_preview() {
    let cli = Cli::try_parse_from(["jobintel", "cleanup"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cleanup {
            execute: false,
            report_only: false
        })
    ));
}

#[test]
fn cleanup_execute_conflicts_with_report_only() {
    assert!(Cli::try_parse_from(["jobintel", "cleanup", "--execute", "--report-only"]).is_err());
    let cli = Cli::try_parse_from(["jobintel", "cleanup", "--execute"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Cleanup { execute: true, .. })
    ));
}

#[test]
fn classify_requires_at_least_one_input() {
    assert!(Cli::try_parse_from(["jobintel", "classify"]).is_err());
    let cli = Cli::try_parse_from(["jobintel", "classify", "Pune", "Austin, TX"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Classify { ref text }) if text.len() == 2
    ));
}

#[test]
fn report_parses() {
    let cli = Cli::try_parse_from(["jobintel", "report"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Report)));
}

#[test]
fn plan_overrides_replace_configured_lists() {
    let plan = collect::plan_for(&app_config(), Some("Chennai"), Some("glassdoor")).unwrap();
    assert_eq!(plan.cities, vec!["Chennai".to_string()]);
    assert_eq!(plan.portals, vec![Portal::Glassdoor]);

    let plan = collect::plan_for(&app_config(), None, None).unwrap();
    assert_eq!(plan.cities.len(), 2);
    assert_eq!(plan.portals, vec![Portal::Indeed, Portal::Linkedin]);
}

#[test]
fn plan_rejects_unknown_portal() {
    assert!(collect::plan_for(&app_config(), None, Some("monster")).is_err());
}

#[test]
fn classify_all_keeps_input_order() {
    let classifier = LocationClassifier::with_builtin_registry();
    let inputs = vec!["Bangalore".to_string(), "Cincinnati, OH".to_string()];
    let out = audit::classify_all(&classifier, &inputs);

    assert_eq!(out[0].input, "Bangalore");
    assert_eq!(out[0].verdict.normalized_city(), Some("Bengaluru"));
    assert_eq!(out[1].verdict.rejection_category(), RejectionCategory::UsLocation);

    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json[0]["input"], "Bangalore");
}

#[tokio::test]
async fn dry_run_pipeline_cleans_without_database() {
    let gate = Arc::new(ValidationGate::new(
        Arc::new(LocationClassifier::with_builtin_registry()),
        RemotePolicy::Reject,
    ));
    let batch = vec![
        RawJob {
            title: Some("Rust Developer".to_string()),
            company: Some("Acme Pvt Ltd".to_string()),
            location: Some("Pune, Maharashtra".to_string()),
            description: Some("Build things".to_string()),
            ..RawJob::default()
        },
        RawJob {
            title: Some("Go Developer".to_string()),
            location: Some("Austin, TX".to_string()),
            description: Some("Build things".to_string()),
            ..RawJob::default()
        },
    ];

    let summary = pipeline::clean_and_store(None, &gate, batch).await;

    assert_eq!(summary.raw, 2);
    assert_eq!(summary.cleaned, 1);
    assert_eq!(summary.stats.invalid_count, 1);
    assert!(summary.insert.is_none());
}

#[test]
fn totals_line_reports_every_table() {
    let stats = jobintel_db::DatabaseStats {
        total_jobs: 12,
        total_companies: 4,
        total_locations: 3,
        remote_jobs: 2,
        jobs_by_city: Vec::new(),
    };
    assert_eq!(
        audit::totals_line(&stats),
        "jobs: 12 (2 remote), companies: 4, locations: 3"
    );
}

#[test]
fn classify_needs_no_app_config() {
    let classifier = LocationClassifier::with_builtin_registry();
    let inputs = vec!["Pune".to_string(), String::new()];
    assert!(audit::run_classify(&classifier, &inputs).is_ok());
}
