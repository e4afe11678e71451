use std::time::Duration;

use jobintel_core::{AppConfig, RawJob};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::connector::{JobConnector, Portal, ScrapeRequest};
use crate::error::ScraperError;

/// Response body of the job-search service's `GET /jobs` endpoint.
#[derive(Debug, Deserialize)]
struct JobsResponse {
    #[serde(default)]
    jobs: Vec<RawJob>,
}

/// HTTP client for a JSON job-search service fronting the portals.
///
/// Each [`JobConnector::fetch`] call is a single request; status codes are
/// mapped to typed [`ScraperError`]s so the retry wrapper can tell transient
/// failures (429, 5xx, network) from permanent ones.
#[derive(Debug, Clone)]
pub struct PortalClient {
    client: Client,
    base_url: Url,
}

impl PortalClient {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidEndpoint`] if `base_url` is not an
    /// absolute http(s) URL, or [`ScraperError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let mut parsed = Url::parse(base_url).map_err(|e| ScraperError::InvalidEndpoint {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidEndpoint {
                url: base_url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        // `Url::join` replaces the last path segment unless the path ends in '/'.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// # Errors
    ///
    /// Same as [`PortalClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            &config.scraper_base_url,
            config.scraper_request_timeout_secs,
            &config.scraper_user_agent,
        )
    }

    fn jobs_url(&self, request: &ScrapeRequest) -> Result<Url, ScraperError> {
        let mut url = self
            .base_url
            .join("jobs")
            .map_err(|e| ScraperError::InvalidEndpoint {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("site", request.portal.as_str())
                .append_pair("search_term", &request.search_term)
                .append_pair("location", &request.city)
                .append_pair("results_wanted", &request.results_wanted.to_string())
                .append_pair("hours_old", &request.hours_old.to_string());
            if request.portal == Portal::Indeed {
                query.append_pair("country_indeed", "India");
            }
        }
        Ok(url)
    }

    async fn fetch_once(&self, request: &ScrapeRequest) -> Result<Vec<RawJob>, ScraperError> {
        let url = self.jobs_url(request)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ScraperError::RateLimited {
                portal: request.portal.to_string(),
                retry_after_secs,
            });
        }
        if status.is_server_error() {
            return Err(ScraperError::ServerError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNPROCESSABLE_ENTITY {
            let message = response.text().await.unwrap_or_default();
            return Err(ScraperError::BadRequest {
                url: url.to_string(),
                message,
            });
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ScraperError::Unauthorized {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: JobsResponse =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!(
                    "{} results for '{}' in {}",
                    request.portal, request.search_term, request.city
                ),
                source: e,
            })?;

        let portal = request.portal.as_str();
        Ok(parsed
            .jobs
            .into_iter()
            .map(|mut job| {
                if job.source_portal.is_none() {
                    job.source_portal = Some(portal.to_string());
                }
                job
            })
            .collect())
    }
}

impl JobConnector for PortalClient {
    async fn fetch(&self, request: &ScrapeRequest) -> Result<Vec<RawJob>, ScraperError> {
        tracing::debug!(
            portal = %request.portal,
            search_term = %request.search_term,
            city = %request.city,
            results_wanted = request.results_wanted,
            "requesting jobs"
        );
        self.fetch_once(request).await
    }
}
