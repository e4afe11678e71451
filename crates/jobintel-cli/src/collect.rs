//! The `collect` command: scrape, gate, clean, store.

use std::sync::Arc;

use anyhow::Context;
use jobintel_core::{AppConfig, ValidationGate};
use jobintel_scraper::{Portal, PortalClient, RetryConfig, ScrapeManager, ScrapePlan};
use tokio_util::sync::CancellationToken;

use crate::pipeline::{clean_and_store, print_summary};

/// Apply the command-line overrides to the configured plan.
pub(crate) fn plan_for(
    config: &AppConfig,
    city: Option<&str>,
    portal: Option<&str>,
) -> anyhow::Result<ScrapePlan> {
    let mut plan = ScrapePlan::from_app_config(config)?;
    if let Some(city) = city {
        plan.cities = vec![city.to_string()];
    }
    if let Some(portal) = portal {
        let portal: Portal = portal.parse()?;
        plan.portals = vec![portal];
    }
    if plan.cities.is_empty() || plan.search_terms.is_empty() || plan.portals.is_empty() {
        anyhow::bail!("scrape plan is empty; check JOBINTEL_SCRAPER_CITIES, _SEARCH_TERMS and _PORTALS");
    }
    Ok(plan)
}

/// # Errors
///
/// Returns an error if the plan or client cannot be built, or if every
/// scrape unit failed.
pub(crate) async fn run_collect(
    pool: Option<&sqlx::PgPool>,
    config: &AppConfig,
    gate: &Arc<ValidationGate>,
    city: Option<&str>,
    portal: Option<&str>,
    cancel: &CancellationToken,
) -> anyhow::Result<()> {
    let plan = plan_for(config, city, portal)?;
    let client = PortalClient::from_app_config(config).context("failed to build portal client")?;
    let manager = ScrapeManager::new(
        client,
        Arc::clone(gate),
        RetryConfig::from_app_config(config),
        plan,
    );

    let report = manager.run(cancel).await;
    println!(
        "scrape: {} units, {} failed, {} jobs fetched, {} kept after location filter",
        report.units.len(),
        report.failed_units(),
        report.fetched_total(),
        report.kept_total()
    );
    if !report.units.is_empty() && report.failed_units() == report.units.len() {
        anyhow::bail!("all {} scrape units failed", report.units.len());
    }
    if report.jobs.is_empty() {
        println!("no jobs to clean");
        return Ok(());
    }

    let summary = clean_and_store(pool, gate, report.jobs).await;
    print_summary(&summary);
    Ok(())
}
