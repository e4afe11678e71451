//! Cleaning and storage shared by `collect` and `clean`.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use jobintel_core::{
    critical_gaps, field_completeness, CleaningStage, FieldCompleteness, QualityStats, RawJob,
    ValidationGate,
};
use jobintel_db::InsertSummary;

/// What happened to one batch between the raw input and the database.
pub(crate) struct PipelineSummary {
    pub raw: usize,
    pub cleaned: usize,
    pub dropped_incomplete: usize,
    pub stats: QualityStats,
    /// `None` for dry runs.
    pub insert: Option<InsertSummary>,
}

/// Run the cleaning stage over `batch` and, when a pool is given, insert the
/// survivors through the pre-insert gate.
pub(crate) async fn clean_and_store(
    pool: Option<&sqlx::PgPool>,
    gate: &Arc<ValidationGate>,
    batch: Vec<RawJob>,
) -> PipelineSummary {
    let raw = batch.len();
    let output = CleaningStage::new(Arc::clone(gate)).run(batch);
    let insert = match pool {
        Some(pool) => Some(jobintel_db::insert_jobs(pool, gate, &output.jobs).await),
        None => None,
    };
    PipelineSummary {
        raw,
        cleaned: output.jobs.len(),
        dropped_incomplete: output.dropped_incomplete,
        stats: output.stats,
        insert,
    }
}

/// Clean a JSON array of raw postings from `input`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of jobs.
pub(crate) async fn run_clean_file(
    pool: Option<&sqlx::PgPool>,
    gate: &Arc<ValidationGate>,
    input: &Path,
) -> anyhow::Result<()> {
    let body = tokio::fs::read_to_string(input)
        .await
        .with_context(|| format!("failed to read {}", input.display()))?;
    let batch: Vec<RawJob> = serde_json::from_str(&body)
        .with_context(|| format!("{} is not a JSON array of job postings", input.display()))?;
    if batch.is_empty() {
        println!("no jobs in {}; nothing to clean", input.display());
        return Ok(());
    }

    print_field_completeness(&field_completeness(&batch));
    let summary = clean_and_store(pool, gate, batch).await;
    print_summary(&summary);
    Ok(())
}

pub(crate) fn print_summary(summary: &PipelineSummary) {
    println!(
        "cleaning: {} in, {} kept, {} dropped as incomplete",
        summary.raw, summary.cleaned, summary.dropped_incomplete
    );
    print_location_stats(&summary.stats);
    match &summary.insert {
        Some(insert) => println!(
            "database: {} inserted, {} already present, {} refused, {} failed",
            insert.inserted, insert.existing, insert.refused, insert.errors
        ),
        None => println!("dry-run: nothing written to the database"),
    }
}

pub(crate) fn print_location_stats(stats: &QualityStats) {
    println!(
        "locations: {} checked, {} valid, {} rejected ({:.1}% valid)",
        stats.total, stats.valid_count, stats.invalid_count, stats.location_coverage_pct
    );
    if stats.jobs_observed > 0 {
        println!(
            "coverage: salary {:.1}%, description {:.1}%",
            stats.salary_coverage_pct, stats.description_coverage_pct
        );
    }
    for (category, count) in &stats.rejection_counts_by_category {
        println!("  {:<16}{count}", category.as_str());
    }
    let reasons = stats.top_rejection_reasons(5);
    if !reasons.is_empty() {
        println!("top rejection reasons:");
        for (reason, count) in reasons {
            println!("  {count:>6}  {reason}");
        }
    }
}

pub(crate) fn print_field_completeness(fields: &[FieldCompleteness]) {
    println!("{:<20}{:>9}{:>9}{:>9}  TIER", "FIELD", "PRESENT", "MISSING", "PCT");
    for f in fields {
        println!(
            "{:<20}{:>9}{:>9}{:>8.1}%  {}",
            f.field,
            f.present,
            f.missing,
            f.percentage,
            f.tier.as_str()
        );
    }
    let gaps = critical_gaps(fields);
    if !gaps.is_empty() {
        tracing::warn!(fields = ?gaps, "critical fields are missing from more than 10% of jobs");
    }
}
