//! Location enforcement at the scrape, clean, and insert stages.
//!
//! All three stages share one [`LocationClassifier`] through a single
//! [`ValidationGate`], so they can never disagree about what is valid. A
//! rejected location is an expected outcome and is returned as data, never
//! as an error.

use std::sync::Arc;

use crate::app_config::AppConfig;
use crate::jobs::{CleanJob, RawJob, ValidatedLocation};
use crate::location::{ApprovedCityRegistry, LocationClassifier, ValidationVerdict};
use crate::quality::QualityStats;
use crate::ConfigError;

/// What to do with postings whose only location is a remote marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemotePolicy {
    /// Drop them like any other non-Indian location.
    #[default]
    Reject,
    /// Keep the job with no location and `remote = true`.
    RetainFlagged,
}

/// A job that passed the pre-clean gate.
#[derive(Debug, Clone, PartialEq)]
pub struct GatedJob {
    pub job: RawJob,
    /// `None` only for a remote posting kept under [`RemotePolicy::RetainFlagged`].
    pub location: Option<ValidatedLocation>,
}

/// Outcome of the pre-insert gate for a whole job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Located(ValidatedLocation),
    RemoteWithoutLocation,
}

#[derive(Debug, Clone)]
pub struct ValidationGate {
    classifier: Arc<LocationClassifier>,
    remote_policy: RemotePolicy,
}

impl ValidationGate {
    #[must_use]
    pub fn new(classifier: Arc<LocationClassifier>, remote_policy: RemotePolicy) -> Self {
        Self {
            classifier,
            remote_policy,
        }
    }

    /// Build the gate from configuration: the city registry named by
    /// `JOBINTEL_CITIES_PATH` (or the built-in list) and the remote policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the cities file cannot be read or is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let registry = match &config.cities_path {
            Some(path) => ApprovedCityRegistry::load(path)?,
            None => ApprovedCityRegistry::builtin(),
        };
        tracing::info!(
            cities = registry.len(),
            custom = config.cities_path.is_some(),
            remote_policy = ?config.remote_policy,
            "approved city registry loaded"
        );
        let classifier = LocationClassifier::new(Arc::new(registry));
        Ok(Self::new(Arc::new(classifier), config.remote_policy))
    }

    #[must_use]
    pub fn classifier(&self) -> &LocationClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn remote_policy(&self) -> RemotePolicy {
        self.remote_policy
    }

    fn retains(&self, verdict: &ValidationVerdict) -> bool {
        verdict.is_valid()
            || (verdict.is_remote() && self.remote_policy == RemotePolicy::RetainFlagged)
    }

    /// Post-scrape filter: silently drops jobs with invalid locations.
    #[must_use]
    pub fn filter_scraped(&self, batch: Vec<RawJob>) -> Vec<RawJob> {
        let received = batch.len();
        let kept: Vec<RawJob> = batch
            .into_iter()
            .filter(|job| {
                let verdict = self.classifier.classify(job.location.as_deref());
                if self.retains(&verdict) {
                    return true;
                }
                log_rejection("scrape", job.location.as_deref(), &verdict);
                false
            })
            .collect();
        if kept.len() < received {
            tracing::info!(
                stage = "scrape",
                received,
                kept = kept.len(),
                dropped = received - kept.len(),
                "dropped scraped jobs with invalid locations"
            );
        }
        kept
    }

    /// Pre-clean filter: drops invalid jobs, normalizes the rest, and records
    /// every verdict into `stats`.
    #[must_use]
    pub fn filter_for_cleaning(&self, batch: Vec<RawJob>, stats: &mut QualityStats) -> Vec<GatedJob> {
        let mut kept = Vec::with_capacity(batch.len());
        for job in batch {
            let verdict = self.classifier.classify(job.location.as_deref());
            stats.record_job(&job, &verdict);
            if !self.retains(&verdict) {
                log_rejection("clean", job.location.as_deref(), &verdict);
                continue;
            }
            let location = ValidatedLocation::from_verdict(&verdict);
            kept.push(GatedJob { job, location });
        }
        kept
    }

    /// Pre-insert gate for a bare location. `None` means "do not write".
    #[must_use]
    pub fn admit(&self, raw: Option<&str>) -> Option<ValidatedLocation> {
        let verdict = self.classifier.classify(raw);
        let admitted = ValidatedLocation::from_verdict(&verdict);
        if admitted.is_none() {
            log_rejection("insert", raw, &verdict);
        }
        admitted
    }

    /// Pre-insert gate for a cleaned job.
    ///
    /// The job's location is re-classified from its stored form; a job with
    /// no location is only admitted when it is a retained remote posting.
    #[must_use]
    pub fn admit_job(&self, job: &CleanJob) -> Option<Admission> {
        match &job.location {
            Some(location) => self
                .admit(Some(&location.display_text()))
                .map(Admission::Located),
            None if job.remote && self.remote_policy == RemotePolicy::RetainFlagged => {
                Some(Admission::RemoteWithoutLocation)
            }
            None => {
                tracing::debug!(
                    stage = "insert",
                    title = %job.title,
                    "refusing job without a location"
                );
                None
            }
        }
    }
}

fn log_rejection(stage: &'static str, raw: Option<&str>, verdict: &ValidationVerdict) {
    tracing::debug!(
        stage,
        location = raw.unwrap_or("<null>"),
        category = %verdict.rejection_category(),
        detail = verdict.rejection_detail(),
        "rejected location"
    );
}
