//! Cleaning stage: pre-clean location gate plus field tidying.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::gate::{GatedJob, ValidationGate};
use crate::jobs::{CleanJob, RawJob};
use crate::quality::QualityStats;

pub const MAX_TITLE_CHARS: usize = 255;
pub const MAX_COMPANY_CHARS: usize = 255;
pub const MAX_URL_CHARS: usize = 500;

/// Salaries outside this range (INR per year) are treated as unknown.
pub const SALARY_FLOOR: f64 = 1_000.0;
pub const SALARY_CEILING: f64 = 10_000_000.0;

pub const DEFAULT_EXPERIENCE_LEVEL: &str = "Entry Level";
pub const DEFAULT_JOB_TYPE: &str = "Full-time";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));
static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static COMPANY_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[\s,]+(Pvt\.?|Ltd\.?|Private Limited|Limited)$").expect("valid regex")
});

const EXPERIENCE_LEVELS: &[(&str, &str)] = &[
    ("entry", "Entry Level"),
    ("junior", "Entry Level"),
    ("mid", "Mid Level"),
    ("senior", "Senior Level"),
    ("lead", "Senior Level"),
    ("principal", "Senior Level"),
    ("staff", "Senior Level"),
    ("intern", "Internship"),
    ("internship", "Internship"),
];

const JOB_TYPES: &[(&str, &str)] = &[
    ("full time", "Full-time"),
    ("full-time", "Full-time"),
    ("fulltime", "Full-time"),
    ("part time", "Part-time"),
    ("part-time", "Part-time"),
    ("parttime", "Part-time"),
    ("contract", "Contract"),
    ("temporary", "Contract"),
    ("remote", "Remote"),
    ("hybrid", "Hybrid"),
    ("onsite", "On-site"),
    ("on-site", "On-site"),
];

/// Result of one cleaning run.
#[derive(Debug, Clone, Default)]
pub struct CleaningOutput {
    pub jobs: Vec<CleanJob>,
    /// Location verdicts for every job that entered the stage.
    pub stats: QualityStats,
    /// Jobs with a valid location but no usable title or description.
    pub dropped_incomplete: usize,
}

#[derive(Debug, Clone)]
pub struct CleaningStage {
    gate: Arc<ValidationGate>,
}

impl CleaningStage {
    #[must_use]
    pub fn new(gate: Arc<ValidationGate>) -> Self {
        Self { gate }
    }

    /// Run the pre-clean gate and tidy every surviving job.
    ///
    /// Input order is preserved. A job without a title or description after
    /// tidying is dropped and counted in `dropped_incomplete`.
    #[must_use]
    pub fn run(&self, batch: Vec<RawJob>) -> CleaningOutput {
        let received = batch.len();
        let mut stats = QualityStats::default();
        let gated = self.gate.filter_for_cleaning(batch, &mut stats);
        let after_gate = gated.len();

        let mut jobs = Vec::with_capacity(after_gate);
        let mut dropped_incomplete = 0usize;
        for gated_job in gated {
            match clean_job(gated_job) {
                Some(job) => jobs.push(job),
                None => dropped_incomplete += 1,
            }
        }

        tracing::info!(
            received,
            dropped_location = received - after_gate,
            dropped_incomplete,
            kept = jobs.len(),
            location_coverage_pct = stats.location_coverage_pct,
            "cleaning complete"
        );

        CleaningOutput {
            jobs,
            stats,
            dropped_incomplete,
        }
    }
}

fn clean_job(gated: GatedJob) -> Option<CleanJob> {
    let GatedJob { job, location } = gated;
    let title = job.title.as_deref().and_then(clean_title)?;
    let description = job.description.as_deref().and_then(clean_description)?;

    let job_type = normalize_job_type(job.job_type.as_deref());
    let remote = location.is_none() || job_type == "Remote";
    let (salary_min, salary_max) = salary_range(job.salary_min, job.salary_max);

    Some(CleanJob {
        title,
        company: job.company.as_deref().and_then(clean_company),
        location,
        remote,
        description: Some(description),
        job_url: job.job_url.as_deref().and_then(clean_url),
        source_portal: job
            .source_portal
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty()),
        salary_min,
        salary_max,
        posted_date: job.posted_date,
        job_type: job_type.to_string(),
        experience_level: normalize_experience_level(job.experience_level.as_deref()).to_string(),
    })
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

fn truncate_chars(text: String, max: usize) -> String {
    if text.chars().count() <= max {
        return text;
    }
    text.chars().take(max).collect::<String>().trim_end().to_string()
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Bound each end with [`bounded_salary`], then put an inverted pair in order.
#[must_use]
pub fn salary_range(min: Option<f64>, max: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (min.and_then(bounded_salary), max.and_then(bounded_salary)) {
        (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
        pair => pair,
    }
}

/// Collapse whitespace and cap at [`MAX_TITLE_CHARS`].
#[must_use]
pub fn clean_title(raw: &str) -> Option<String> {
    non_empty(truncate_chars(collapse_whitespace(raw), MAX_TITLE_CHARS))
}

/// Strip trailing legal-entity suffixes (`Pvt Ltd`, `Private Limited`, ...).
#[must_use]
pub fn clean_company(raw: &str) -> Option<String> {
    let mut name = collapse_whitespace(raw);
    loop {
        let stripped = COMPANY_SUFFIX.replace(&name, "").into_owned();
        if stripped == name {
            break;
        }
        name = stripped;
    }
    non_empty(truncate_chars(name, MAX_COMPANY_CHARS))
}

/// Remove HTML tags and collapse whitespace.
#[must_use]
pub fn clean_description(raw: &str) -> Option<String> {
    let without_tags = HTML_TAG.replace_all(raw, " ");
    non_empty(collapse_whitespace(&without_tags))
}

#[must_use]
pub fn clean_url(raw: &str) -> Option<String> {
    non_empty(truncate_chars(raw.trim().to_string(), MAX_URL_CHARS))
}

/// `None` for zero, non-finite, or out-of-range amounts.
#[must_use]
pub fn bounded_salary(amount: f64) -> Option<f64> {
    (amount.is_finite() && (SALARY_FLOOR..=SALARY_CEILING).contains(&amount)).then_some(amount)
}

/// Map a portal's seniority label onto the four levels used downstream.
///
/// Matches the whole label first, then its leading word, so `"Mid-Senior
/// level"` becomes `Mid Level`.
#[must_use]
pub fn normalize_experience_level(raw: Option<&str>) -> &'static str {
    let Some(label) = raw.map(|r| r.trim().to_lowercase()) else {
        return DEFAULT_EXPERIENCE_LEVEL;
    };
    let leading = label
        .split(|c: char| !c.is_alphabetic())
        .find(|w| !w.is_empty())
        .unwrap_or_default();
    lookup(EXPERIENCE_LEVELS, &label)
        .or_else(|| lookup(EXPERIENCE_LEVELS, leading))
        .unwrap_or(DEFAULT_EXPERIENCE_LEVEL)
}

#[must_use]
pub fn normalize_job_type(raw: Option<&str>) -> &'static str {
    raw.map(|r| collapse_whitespace(&r.to_lowercase()))
        .and_then(|label| lookup(JOB_TYPES, &label))
        .unwrap_or(DEFAULT_JOB_TYPE)
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(from, _)| *from == key)
        .map(|(_, to)| *to)
}
