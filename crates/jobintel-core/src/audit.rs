//! Whole-database location audit.
//!
//! [`preview`] re-classifies every persisted location and never deletes.
//! [`execute`] deletes exactly the locations a preview flagged, together with
//! the jobs that reference them. Storage access goes through the
//! [`LocationStore`] trait so the audit logic stays independent of Postgres.

use std::future::Future;

use serde::Serialize;

use crate::location::{LocationClassifier, RejectionCategory};
use crate::quality::QualityStats;

/// One row of the locations table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistedLocation {
    pub id: i64,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl PersistedLocation {
    /// `"city, state"` as it would have been scraped; `None` for a blank city.
    #[must_use]
    pub fn display_text(&self) -> Option<String> {
        let city = self.city.as_deref().map(str::trim).filter(|c| !c.is_empty())?;
        match self.state.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(state) => Some(format!("{city}, {state}")),
            None => Some(city.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidLocationEntry {
    pub id: i64,
    pub city: Option<String>,
    pub state: Option<String>,
    pub category: RejectionCategory,
    pub detail: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub stats: QualityStats,
    pub invalid_entries: Vec<InvalidLocationEntry>,
    /// Jobs referencing any invalid location.
    pub affected_jobs: u64,
    /// Non-remote jobs with no location at all.
    pub jobs_without_location: u64,
    /// Ids of those jobs as seen by the preview; execute deletes only these.
    pub unlocated_job_ids: Vec<i64>,
}

impl AuditReport {
    #[must_use]
    pub fn invalid_ids(&self) -> Vec<i64> {
        self.invalid_entries.iter().map(|e| e.id).collect()
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.invalid_entries.is_empty() && self.jobs_without_location == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditMode {
    /// Report only; nothing is deleted.
    Preview,
    /// Report, then delete what the report flagged.
    Execute,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanupOutcome {
    pub deleted_jobs: u64,
    pub deleted_locations: u64,
    pub deleted_unlocated_jobs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditOutcome {
    pub report: AuditReport,
    /// `None` in [`AuditMode::Preview`].
    pub cleanup: Option<CleanupOutcome>,
}

/// Persistence operations the audit needs.
pub trait LocationStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_all_locations(
        &self,
    ) -> impl Future<Output = Result<Vec<PersistedLocation>, Self::Error>> + Send;

    fn count_jobs_for_locations(
        &self,
        ids: &[i64],
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Delete the jobs referencing `ids`, then the locations themselves.
    ///
    /// Only `deleted_jobs` and `deleted_locations` of the outcome are set.
    fn delete_jobs_by_location_ids(
        &self,
        ids: &[i64],
    ) -> impl Future<Output = Result<CleanupOutcome, Self::Error>> + Send;

    /// Ids of jobs with no location that are not flagged remote.
    fn list_jobs_without_location(
        &self,
    ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send;

    /// Delete the given jobs, skipping any that have since gained a location
    /// or been flagged remote.
    fn delete_jobs_without_location(
        &self,
        job_ids: &[i64],
    ) -> impl Future<Output = Result<u64, Self::Error>> + Send;
}

/// Re-classify every persisted location. Never deletes.
///
/// # Errors
///
/// Returns the store's error if any read fails.
pub async fn preview<S: LocationStore>(
    store: &S,
    classifier: &LocationClassifier,
) -> Result<AuditReport, S::Error> {
    let locations = store.fetch_all_locations().await?;

    let mut stats = QualityStats::default();
    let mut invalid_entries = Vec::new();
    for location in locations {
        let text = location.display_text();
        let verdict = classifier.classify(text.as_deref());
        stats.record(&verdict);
        if !verdict.is_valid() {
            invalid_entries.push(InvalidLocationEntry {
                id: location.id,
                city: location.city,
                state: location.state,
                category: verdict.rejection_category(),
                detail: verdict.rejection_detail().to_string(),
            });
        }
    }

    let unlocated_job_ids = store.list_jobs_without_location().await?;
    let mut report = AuditReport {
        stats,
        invalid_entries,
        affected_jobs: 0,
        jobs_without_location: unlocated_job_ids.len() as u64,
        unlocated_job_ids,
    };
    let ids = report.invalid_ids();
    if !ids.is_empty() {
        report.affected_jobs = store.count_jobs_for_locations(&ids).await?;
    }

    tracing::info!(
        total = report.stats.total,
        invalid = report.invalid_entries.len(),
        affected_jobs = report.affected_jobs,
        jobs_without_location = report.jobs_without_location,
        "location audit preview complete"
    );
    Ok(report)
}

/// Delete exactly the locations flagged by `report` and their jobs.
///
/// # Errors
///
/// Returns the store's error if the deletion fails.
pub async fn execute<S: LocationStore>(
    store: &S,
    report: &AuditReport,
) -> Result<CleanupOutcome, S::Error> {
    let ids = report.invalid_ids();
    if ids.is_empty() {
        return Ok(CleanupOutcome::default());
    }
    let outcome = store.delete_jobs_by_location_ids(&ids).await?;
    tracing::warn!(
        deleted_jobs = outcome.deleted_jobs,
        deleted_locations = outcome.deleted_locations,
        "deleted invalid locations"
    );
    Ok(outcome)
}

/// Preview, and in [`AuditMode::Execute`] also delete the previewed
/// locations and the previewed non-remote jobs that have no location.
///
/// # Errors
///
/// Returns the store's error from the first failing operation.
pub async fn audit_persisted_locations<S: LocationStore>(
    store: &S,
    classifier: &LocationClassifier,
    mode: AuditMode,
) -> Result<AuditOutcome, S::Error> {
    let report = preview(store, classifier).await?;
    if mode == AuditMode::Preview {
        return Ok(AuditOutcome {
            report,
            cleanup: None,
        });
    }

    let mut cleanup = execute(store, &report).await?;
    if !report.unlocated_job_ids.is_empty() {
        cleanup.deleted_unlocated_jobs = store
            .delete_jobs_without_location(&report.unlocated_job_ids)
            .await?;
        tracing::warn!(
            previewed = report.jobs_without_location,
            deleted = cleanup.deleted_unlocated_jobs,
            "deleted jobs without a location"
        );
    }
    Ok(AuditOutcome {
        report,
        cleanup: Some(cleanup),
    })
}

#[cfg(test)]
#[path = "audit_test.rs"]
mod tests;
