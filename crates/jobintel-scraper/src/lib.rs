pub mod client;
pub mod connector;
pub mod error;
pub mod manager;
pub mod retry;

pub use client::PortalClient;
pub use connector::{JobConnector, Portal, ScrapeRequest};
pub use error::ScraperError;
pub use manager::{ScrapeManager, ScrapePlan, ScrapeReport, UnitOutcome, UnitReport};
pub use retry::{
    execute_with_retry, execute_with_retry_observed, RetryConfig, RetryError, RetryState,
    Retryable,
};
