//! Batch and whole-database quality statistics.
//!
//! Two views are offered: location validation outcomes with coverage
//! percentages ([`QualityStats`]), and per-field completeness of a batch of
//! raw jobs ([`field_completeness`]).

use std::collections::BTreeMap;

use serde::Serialize;

use crate::jobs::RawJob;
use crate::location::{LocationClassifier, RejectionCategory, ValidationVerdict};

/// Fields whose missing share must stay at or below [`CRITICAL_MISSING_PCT`].
pub const CRITICAL_FIELDS: &[&str] = &["title", "company", "location", "description", "job_url"];

pub const CRITICAL_MISSING_PCT: f64 = 10.0;

// ---------------------------------------------------------------------------
// Location statistics
// ---------------------------------------------------------------------------

/// Validation outcome counts for one batch. Created fresh per report.
///
/// The coverage percentages are kept current by every `record*` call and are
/// `0.0` while their denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QualityStats {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub rejection_counts_by_category: BTreeMap<RejectionCategory, usize>,
    /// Counts per rejection detail string.
    pub rejection_reasons: BTreeMap<String, usize>,
    /// Jobs seen through [`QualityStats::record_job`]; denominator for the
    /// salary and description coverage.
    pub jobs_observed: usize,
    pub jobs_with_salary: usize,
    pub jobs_with_description: usize,
    pub location_coverage_pct: f64,
    pub salary_coverage_pct: f64,
    pub description_coverage_pct: f64,
}

impl QualityStats {
    /// Count one location verdict.
    pub fn record(&mut self, verdict: &ValidationVerdict) {
        self.total += 1;
        if verdict.is_valid() {
            self.valid_count += 1;
        } else {
            self.invalid_count += 1;
            *self
                .rejection_counts_by_category
                .entry(verdict.rejection_category())
                .or_default() += 1;
            *self
                .rejection_reasons
                .entry(verdict.rejection_detail().to_string())
                .or_default() += 1;
        }
        self.refresh_percentages();
    }

    /// Count one job: its location verdict plus salary/description presence.
    pub fn record_job(&mut self, job: &RawJob, verdict: &ValidationVerdict) {
        self.jobs_observed += 1;
        if job.has_salary() {
            self.jobs_with_salary += 1;
        }
        if job.has_description() {
            self.jobs_with_description += 1;
        }
        self.record(verdict);
    }

    /// Fold another batch's counts into this one.
    pub fn merge(&mut self, other: &QualityStats) {
        self.total += other.total;
        self.valid_count += other.valid_count;
        self.invalid_count += other.invalid_count;
        for (category, count) in &other.rejection_counts_by_category {
            *self.rejection_counts_by_category.entry(*category).or_default() += count;
        }
        for (reason, count) in &other.rejection_reasons {
            *self.rejection_reasons.entry(reason.clone()).or_default() += count;
        }
        self.jobs_observed += other.jobs_observed;
        self.jobs_with_salary += other.jobs_with_salary;
        self.jobs_with_description += other.jobs_with_description;
        self.refresh_percentages();
    }

    /// Rejection reasons, most frequent first (ties by reason text).
    #[must_use]
    pub fn top_rejection_reasons(&self, limit: usize) -> Vec<(&str, usize)> {
        let mut reasons: Vec<(&str, usize)> = self
            .rejection_reasons
            .iter()
            .map(|(reason, count)| (reason.as_str(), *count))
            .collect();
        reasons.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        reasons.truncate(limit);
        reasons
    }

    fn refresh_percentages(&mut self) {
        self.location_coverage_pct = percentage(self.valid_count, self.total, 2);
        self.salary_coverage_pct = percentage(self.jobs_with_salary, self.jobs_observed, 2);
        self.description_coverage_pct =
            percentage(self.jobs_with_description, self.jobs_observed, 2);
    }
}

/// Pure counting over already-classified records.
#[must_use]
pub fn summarize(records: &[(Option<&str>, ValidationVerdict)]) -> QualityStats {
    let mut stats = QualityStats::default();
    for (_, verdict) in records {
        stats.record(verdict);
    }
    stats
}

/// Classify each job's location and count salary/description coverage.
#[must_use]
pub fn summarize_jobs(jobs: &[RawJob], classifier: &LocationClassifier) -> QualityStats {
    let mut stats = QualityStats::default();
    for job in jobs {
        let verdict = classifier.classify(job.location.as_deref());
        stats.record_job(job, &verdict);
    }
    stats
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize, decimals: i32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let scale = 10f64.powi(decimals);
    (part as f64 / whole as f64 * 100.0 * scale).round() / scale
}

// ---------------------------------------------------------------------------
// Field completeness
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    /// ≥ 90 % present.
    Excellent,
    /// 70–89 %.
    Good,
    /// 50–69 %.
    Fair,
    /// < 50 %.
    Poor,
}

impl QualityTier {
    #[must_use]
    pub fn from_percentage(pct: f64) -> Self {
        if pct >= 90.0 {
            Self::Excellent
        } else if pct >= 70.0 {
            Self::Good
        } else if pct >= 50.0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCompleteness {
    pub field: &'static str,
    pub present: usize,
    pub missing: usize,
    /// Present share, one decimal place.
    pub percentage: f64,
    pub tier: QualityTier,
}

impl FieldCompleteness {
    #[must_use]
    pub fn missing_pct(&self) -> f64 {
        percentage(self.missing, self.present + self.missing, 1)
    }
}

fn present_text(value: Option<&String>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

type FieldProbe = fn(&RawJob) -> bool;

const FIELD_PROBES: &[(&str, FieldProbe)] = &[
    ("title", |j| present_text(j.title.as_ref())),
    ("company", |j| present_text(j.company.as_ref())),
    ("location", |j| present_text(j.location.as_ref())),
    ("description", |j| present_text(j.description.as_ref())),
    ("job_url", |j| present_text(j.job_url.as_ref())),
    ("salary", RawJob::has_salary),
    ("posted_date", |j| j.posted_date.is_some()),
    ("job_type", |j| present_text(j.job_type.as_ref())),
    ("experience_level", |j| present_text(j.experience_level.as_ref())),
];

/// Per-field present/missing counts, most complete first.
///
/// An empty batch yields every field at 0 % (`Poor`).
#[must_use]
pub fn field_completeness(jobs: &[RawJob]) -> Vec<FieldCompleteness> {
    let mut fields: Vec<FieldCompleteness> = FIELD_PROBES
        .iter()
        .map(|(field, probe)| {
            let present = jobs.iter().filter(|job| probe(job)).count();
            let pct = percentage(present, jobs.len(), 1);
            FieldCompleteness {
                field: *field,
                present,
                missing: jobs.len() - present,
                percentage: pct,
                tier: QualityTier::from_percentage(pct),
            }
        })
        .collect();
    fields.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    fields
}

/// Critical fields with more than [`CRITICAL_MISSING_PCT`] missing.
#[must_use]
pub fn critical_gaps(fields: &[FieldCompleteness]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|f| CRITICAL_FIELDS.contains(&f.field) && f.missing_pct() > CRITICAL_MISSING_PCT)
        .map(|f| f.field)
        .collect()
}

#[cfg(test)]
#[path = "quality_test.rs"]
mod tests;
