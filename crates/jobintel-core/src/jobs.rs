//! Job records as they move through the pipeline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::location::ValidationVerdict;

/// One scraped posting, exactly as a connector or manual import produced it.
///
/// Field aliases accept the column names emitted by the upstream job-search
/// service (`min_amount`, `date_posted`, `job_level`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawJob {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
    #[serde(default)]
    pub source_portal: Option<String>,
    #[serde(default, alias = "min_amount")]
    pub salary_min: Option<f64>,
    #[serde(default, alias = "max_amount")]
    pub salary_max: Option<f64>,
    #[serde(default, alias = "date_posted")]
    pub posted_date: Option<NaiveDate>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default, alias = "job_level")]
    pub experience_level: Option<String>,
}

impl RawJob {
    #[must_use]
    pub fn has_salary(&self) -> bool {
        self.salary_min.is_some() || self.salary_max.is_some()
    }

    #[must_use]
    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// A location that passed classification, in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedLocation {
    pub city: String,
    pub state: Option<String>,
}

impl ValidatedLocation {
    /// `Some` only for valid verdicts.
    #[must_use]
    pub fn from_verdict(verdict: &ValidationVerdict) -> Option<Self> {
        if !verdict.is_valid() {
            return None;
        }
        verdict.normalized_city().map(|city| Self {
            city: city.to_string(),
            state: verdict.normalized_state().map(str::to_string),
        })
    }

    /// `"city, state"`, or just the city when no state is known.
    #[must_use]
    pub fn display_text(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {state}", self.city),
            None => self.city.clone(),
        }
    }
}

/// A job that survived the cleaning stage.
///
/// `location` is `None` only for remote postings retained under
/// [`crate::RemotePolicy::RetainFlagged`]; `remote` is set in that case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanJob {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<ValidatedLocation>,
    pub remote: bool,
    pub description: Option<String>,
    pub job_url: Option<String>,
    pub source_portal: Option<String>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub posted_date: Option<NaiveDate>,
    pub job_type: String,
    pub experience_level: String,
}
