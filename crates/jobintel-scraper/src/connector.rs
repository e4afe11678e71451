//! Scrape requests and the connector seam.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use jobintel_core::RawJob;

use crate::error::ScraperError;

/// Job portals the search service can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Portal {
    Linkedin,
    Indeed,
    Glassdoor,
}

impl Portal {
    pub const ALL: [Portal; 3] = [Portal::Linkedin, Portal::Indeed, Portal::Glassdoor];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Portal::Linkedin => "linkedin",
            Portal::Indeed => "indeed",
            Portal::Glassdoor => "glassdoor",
        }
    }

    /// Posting age window. Indeed and Glassdoor are only reliable for the
    /// last week.
    #[must_use]
    pub fn hours_old(self) -> u32 {
        match self {
            Portal::Linkedin => 720,
            Portal::Indeed | Portal::Glassdoor => 168,
        }
    }

    /// Glassdoor refuses larger pages.
    #[must_use]
    pub fn cap_results(self, wanted: u32) -> u32 {
        match self {
            Portal::Glassdoor => wanted.min(30),
            Portal::Linkedin | Portal::Indeed => wanted,
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Portal {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Portal::Linkedin),
            "indeed" => Ok(Portal::Indeed),
            "glassdoor" => Ok(Portal::Glassdoor),
            _ => Err(ScraperError::UnknownPortal(s.to_string())),
        }
    }
}

/// One unit of scraping work: a portal, a search term, and a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub portal: Portal,
    pub search_term: String,
    pub city: String,
    pub results_wanted: u32,
    pub hours_old: u32,
}

impl ScrapeRequest {
    /// Builds a request with the portal's result cap and age window applied.
    #[must_use]
    pub fn new(portal: Portal, search_term: &str, city: &str, results_wanted: u32) -> Self {
        Self {
            portal,
            search_term: search_term.to_string(),
            city: city.to_string(),
            results_wanted: portal.cap_results(results_wanted),
            hours_old: portal.hours_old(),
        }
    }
}

/// A source of raw job postings.
///
/// One call is one attempt; retrying is the caller's concern.
pub trait JobConnector: Send + Sync {
    fn fetch(
        &self,
        request: &ScrapeRequest,
    ) -> impl Future<Output = Result<Vec<RawJob>, ScraperError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portal_parses_case_insensitively() {
        assert_eq!("LinkedIn".parse::<Portal>().unwrap(), Portal::Linkedin);
        assert_eq!(" indeed ".parse::<Portal>().unwrap(), Portal::Indeed);
        assert!(matches!(
            "monster".parse::<Portal>(),
            Err(ScraperError::UnknownPortal(_))
        ));
    }

    #[test]
    fn glassdoor_requests_are_capped() {
        let req = ScrapeRequest::new(Portal::Glassdoor, "developer", "Pune", 250);
        assert_eq!(req.results_wanted, 30);
        assert_eq!(req.hours_old, 168);
    }

    #[test]
    fn linkedin_requests_look_back_thirty_days() {
        let req = ScrapeRequest::new(Portal::Linkedin, "developer", "Pune", 250);
        assert_eq!(req.results_wanted, 250);
        assert_eq!(req.hours_old, 720);
    }
}
