use thiserror::Error;

use crate::retry::Retryable;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {portal} (retry after {retry_after_secs}s)")]
    RateLimited {
        portal: String,
        retry_after_secs: u64,
    },

    #[error("server error {status} from {url}")]
    ServerError { status: u16, url: String },

    #[error("bad request to {url}: {message}")]
    BadRequest { url: String, message: String },

    #[error("not authorized ({status}) for {url}")]
    Unauthorized { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("unknown portal \"{0}\"")]
    UnknownPortal(String),
}

impl Retryable for ScraperError {
    /// Connection failures, timeouts, 429 and 5xx are transient; everything
    /// else will fail the same way on the next attempt.
    fn is_retryable(&self) -> bool {
        match self {
            ScraperError::Http(e) => {
                e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
            }
            ScraperError::RateLimited { .. } | ScraperError::ServerError { .. } => true,
            ScraperError::BadRequest { .. }
            | ScraperError::Unauthorized { .. }
            | ScraperError::UnexpectedStatus { .. }
            | ScraperError::Deserialize { .. }
            | ScraperError::InvalidEndpoint { .. }
            | ScraperError::UnknownPortal(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deserialize_err() -> ScraperError {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        ScraperError::Deserialize {
            context: "test".to_owned(),
            source,
        }
    }

    #[test]
    fn rate_limited_and_server_errors_are_retryable() {
        assert!(ScraperError::RateLimited {
            portal: "indeed".to_owned(),
            retry_after_secs: 30,
        }
        .is_retryable());
        assert!(ScraperError::ServerError {
            status: 503,
            url: "http://x".to_owned(),
        }
        .is_retryable());
    }

    #[test]
    fn client_side_failures_are_not_retryable() {
        assert!(!ScraperError::BadRequest {
            url: "http://x".to_owned(),
            message: "missing search_term".to_owned(),
        }
        .is_retryable());
        assert!(!ScraperError::Unauthorized {
            status: 403,
            url: "http://x".to_owned(),
        }
        .is_retryable());
        assert!(!ScraperError::UnexpectedStatus {
            status: 404,
            url: "http://x".to_owned(),
        }
        .is_retryable());
        assert!(!deserialize_err().is_retryable());
        assert!(!ScraperError::UnknownPortal("monster".to_owned()).is_retryable());
    }

    #[tokio::test]
    async fn connect_failure_is_retryable() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1")
            .send()
            .await
            .unwrap_err();
        assert!(ScraperError::Http(err).is_retryable());
    }
}
