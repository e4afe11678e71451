//! The `report`, `cleanup` and `classify` commands.

use jobintel_core::{
    audit_persisted_locations, AuditMode, AuditReport, LocationClassifier, ValidationVerdict,
};
use jobintel_db::{DatabaseStats, PgLocationStore};
use serde::Serialize;

use crate::pipeline::print_location_stats;

/// Audit every stored location (never deletes) and print table totals.
///
/// # Errors
///
/// Returns an error if any database query fails.
pub(crate) async fn run_report(
    pool: &sqlx::PgPool,
    classifier: &LocationClassifier,
) -> anyhow::Result<()> {
    let store = PgLocationStore::new(pool.clone());
    let outcome = audit_persisted_locations(&store, classifier, AuditMode::Preview).await?;
    let stats = jobintel_db::database_stats(pool).await?;

    println!("{}", totals_line(&stats));
    if !stats.jobs_by_city.is_empty() {
        println!("{:<24}JOBS", "CITY");
        for row in &stats.jobs_by_city {
            println!("{:<24}{}", row.city, row.jobs);
        }
    }
    print_audit(&outcome.report, false);
    Ok(())
}

/// Preview invalid stored locations, deleting them only when `execute`.
///
/// # Errors
///
/// Returns an error if any database query fails.
pub(crate) async fn run_cleanup(
    pool: &sqlx::PgPool,
    classifier: &LocationClassifier,
    execute: bool,
    report_only: bool,
) -> anyhow::Result<()> {
    let store = PgLocationStore::new(pool.clone());
    let mode = if execute {
        AuditMode::Execute
    } else {
        AuditMode::Preview
    };

    // Snapshot of table totals ahead of any deletion.
    if execute {
        let before = jobintel_db::database_stats(pool).await?;
        tracing::info!(
            jobs = before.total_jobs,
            companies = before.total_companies,
            locations = before.total_locations,
            "table totals before cleanup"
        );
        println!("before: {}", totals_line(&before));
    }

    let outcome = audit_persisted_locations(&store, classifier, mode).await?;
    print_audit(&outcome.report, report_only);

    match outcome.cleanup {
        Some(cleanup) => {
            println!(
                "deleted {} locations, {} jobs at them, {} jobs without a location",
                cleanup.deleted_locations, cleanup.deleted_jobs, cleanup.deleted_unlocated_jobs
            );
            let after = jobintel_db::database_stats(pool).await?;
            println!("after: {}", totals_line(&after));
        }
        None if outcome.report.is_clean() => println!("nothing to clean up"),
        None => println!("preview only; re-run with --execute to delete these rows"),
    }
    Ok(())
}

pub(crate) fn totals_line(stats: &DatabaseStats) -> String {
    format!(
        "jobs: {} ({} remote), companies: {}, locations: {}",
        stats.total_jobs, stats.remote_jobs, stats.total_companies, stats.total_locations
    )
}

fn print_audit(report: &AuditReport, summary_only: bool) {
    print_location_stats(&report.stats);
    println!(
        "invalid locations: {}, jobs at them: {}, non-remote jobs without a location: {}",
        report.invalid_entries.len(),
        report.affected_jobs,
        report.jobs_without_location
    );
    if summary_only || report.invalid_entries.is_empty() {
        return;
    }
    println!("{:<8}{:<28}{:<20}{:<16}DETAIL", "ID", "CITY", "STATE", "CATEGORY");
    for entry in &report.invalid_entries {
        println!(
            "{:<8}{:<28}{:<20}{:<16}{}",
            entry.id,
            entry.city.as_deref().unwrap_or("-"),
            entry.state.as_deref().unwrap_or("-"),
            entry.category.as_str(),
            entry.detail
        );
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct Classified<'a> {
    pub input: &'a str,
    pub verdict: ValidationVerdict,
}

pub(crate) fn classify_all<'a>(
    classifier: &LocationClassifier,
    inputs: &'a [String],
) -> Vec<Classified<'a>> {
    inputs
        .iter()
        .map(|input| Classified {
            input,
            verdict: classifier.classify(Some(input)),
        })
        .collect()
}

/// # Errors
///
/// Returns an error if the verdicts cannot be serialized.
pub(crate) fn run_classify(classifier: &LocationClassifier, inputs: &[String]) -> anyhow::Result<()> {
    let verdicts = classify_all(classifier, inputs);
    println!("{}", serde_json::to_string_pretty(&verdicts)?);
    Ok(())
}
