//! Drives scraping across cities × search terms × portals.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use jobintel_core::{AppConfig, RawJob, ValidationGate};
use tokio_util::sync::CancellationToken;

use crate::connector::{JobConnector, Portal, ScrapeRequest};
use crate::error::ScraperError;
use crate::retry::{execute_with_retry, RetryConfig, RetryError};

/// What to scrape and how fast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapePlan {
    pub cities: Vec<String>,
    pub search_terms: Vec<String>,
    pub portals: Vec<Portal>,
    /// Split evenly across portals for each (city, term) unit.
    pub max_jobs_per_city: u32,
    /// Pause after each unit before its slot is reused.
    pub delay: Duration,
    pub max_concurrent: usize,
}

impl ScrapePlan {
    /// # Errors
    ///
    /// Returns [`ScraperError::UnknownPortal`] for an unrecognized portal name.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let portals = config
            .scraper_portals
            .iter()
            .map(|p| p.parse())
            .collect::<Result<Vec<Portal>, _>>()?;
        Ok(Self {
            cities: config.scraper_cities.clone(),
            search_terms: config.scraper_search_terms.clone(),
            portals,
            max_jobs_per_city: config.scraper_max_jobs_per_city,
            delay: Duration::from_secs(config.scraper_delay_secs),
            max_concurrent: config.scraper_max_concurrent,
        })
    }

    /// Every unit of work, city-major.
    #[must_use]
    pub fn requests(&self) -> Vec<ScrapeRequest> {
        let portal_count = u32::try_from(self.portals.len().max(1)).unwrap_or(u32::MAX);
        let per_portal = self.max_jobs_per_city / portal_count;
        let mut requests = Vec::with_capacity(
            self.cities.len() * self.search_terms.len() * self.portals.len(),
        );
        for city in &self.cities {
            for term in &self.search_terms {
                for portal in &self.portals {
                    requests.push(ScrapeRequest::new(*portal, term, city, per_portal));
                }
            }
        }
        requests
    }
}

/// Outcome of one unit. `Fetched { count: 0, .. }` is a successful empty
/// search, distinct from `Failed`.
#[derive(Debug)]
pub enum UnitOutcome {
    Fetched { count: usize, kept: usize },
    Failed { error: RetryError<ScraperError> },
}

#[derive(Debug)]
pub struct UnitReport {
    pub request: ScrapeRequest,
    pub outcome: UnitOutcome,
}

/// Per-unit outcomes in plan order, plus every job that passed the
/// post-scrape location gate.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub units: Vec<UnitReport>,
    pub jobs: Vec<RawJob>,
}

impl ScrapeReport {
    #[must_use]
    pub fn fetched_total(&self) -> usize {
        self.units
            .iter()
            .map(|u| match u.outcome {
                UnitOutcome::Fetched { count, .. } => count,
                UnitOutcome::Failed { .. } => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn kept_total(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn failed_units(&self) -> usize {
        self.units
            .iter()
            .filter(|u| matches!(u.outcome, UnitOutcome::Failed { .. }))
            .count()
    }
}

pub struct ScrapeManager<C> {
    connector: C,
    gate: Arc<ValidationGate>,
    retry: RetryConfig,
    plan: ScrapePlan,
}

impl<C: JobConnector> ScrapeManager<C> {
    #[must_use]
    pub fn new(connector: C, gate: Arc<ValidationGate>, retry: RetryConfig, plan: ScrapePlan) -> Self {
        Self {
            connector,
            gate,
            retry,
            plan,
        }
    }

    #[must_use]
    pub fn plan(&self) -> &ScrapePlan {
        &self.plan
    }

    /// Scrape every unit of the plan. Unit failures are recorded in the
    /// report and never abort the run; cancellation stops units that have not
    /// yet started.
    pub async fn run(&self, cancel: &CancellationToken) -> ScrapeReport {
        let requests = self.plan.requests();
        tracing::info!(
            units = requests.len(),
            cities = self.plan.cities.len(),
            search_terms = self.plan.search_terms.len(),
            portals = self.plan.portals.len(),
            "starting scrape"
        );

        let mut results: Vec<(usize, ScrapeRequest, Result<Vec<RawJob>, RetryError<ScraperError>>)> =
            stream::iter(requests.into_iter().enumerate())
                .map(|(idx, request)| async move {
                    let result = self.scrape_unit(&request, cancel).await;
                    (idx, request, result)
                })
                .buffer_unordered(self.plan.max_concurrent.max(1))
                .collect()
                .await;
        results.sort_by_key(|(idx, _, _)| *idx);

        let mut report = ScrapeReport::default();
        for (_, request, result) in results {
            let outcome = match result {
                Ok(jobs) => {
                    let count = jobs.len();
                    let kept = self.gate.filter_scraped(jobs);
                    tracing::info!(
                        portal = %request.portal,
                        city = %request.city,
                        search_term = %request.search_term,
                        count,
                        kept = kept.len(),
                        "scrape unit complete"
                    );
                    let outcome = UnitOutcome::Fetched {
                        count,
                        kept: kept.len(),
                    };
                    report.jobs.extend(kept);
                    outcome
                }
                Err(error) => {
                    tracing::error!(
                        portal = %request.portal,
                        city = %request.city,
                        search_term = %request.search_term,
                        error = %error,
                        "scrape unit failed"
                    );
                    UnitOutcome::Failed { error }
                }
            };
            report.units.push(UnitReport { request, outcome });
        }

        tracing::info!(
            fetched = report.fetched_total(),
            kept = report.kept_total(),
            failed_units = report.failed_units(),
            "scrape complete"
        );
        report
    }

    async fn scrape_unit(
        &self,
        request: &ScrapeRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawJob>, RetryError<ScraperError>> {
        let result = execute_with_retry(|| self.connector.fetch(request), &self.retry, cancel).await;
        if !self.plan.delay.is_zero() {
            tokio::select! {
                () = cancel.cancelled() => {}
                () = tokio::time::sleep(self.plan.delay) => {}
            }
        }
        result
    }
}
