//! Integration tests for `PortalClient` against a local `wiremock` server.
//!
//! Covers the happy path, status-code mapping for every error variant the
//! client can return, and the client running under the retry wrapper.

use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobintel_scraper::{
    execute_with_retry, JobConnector, Portal, PortalClient, RetryConfig, RetryError,
    ScrapeRequest, ScraperError,
};

fn test_client(server: &MockServer) -> PortalClient {
    PortalClient::new(&server.uri(), 5, "jobintel-test/0.1").expect("failed to build test client")
}

fn request(portal: Portal) -> ScrapeRequest {
    ScrapeRequest::new(portal, "software engineer", "Bengaluru", 50)
}

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        min_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
        jitter: false,
    }
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_parses_jobs_and_stamps_portal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("site", "linkedin"))
        .and(query_param("search_term", "software engineer"))
        .and(query_param("location", "Bengaluru"))
        .and(query_param("hours_old", "720"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [
                {
                    "title": "Rust Engineer",
                    "company": "Acme",
                    "location": "Bengaluru, Karnataka",
                    "min_amount": 1200000.0,
                    "date_posted": "2026-10-01",
                    "job_level": "mid-senior level"
                },
                {
                    "title": "Platform Engineer",
                    "location": "Austin, TX",
                    "source_portal": "linkedin-jobs"
                }
            ]
        })))
        .mount(&server)
        .await;

    let jobs = test_client(&server)
        .fetch(&request(Portal::Linkedin))
        .await
        .expect("fetch should succeed");

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].title.as_deref(), Some("Rust Engineer"));
    assert_eq!(jobs[0].salary_min, Some(1_200_000.0));
    assert_eq!(
        jobs[0].posted_date.map(|d| d.to_string()).as_deref(),
        Some("2026-10-01")
    );
    assert_eq!(jobs[0].experience_level.as_deref(), Some("mid-senior level"));
    assert_eq!(jobs[0].source_portal.as_deref(), Some("linkedin"));
    assert_eq!(jobs[1].source_portal.as_deref(), Some("linkedin-jobs"));
}

#[tokio::test]
async fn empty_result_is_ok_and_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jobs": [] })))
        .mount(&server)
        .await;

    let jobs = test_client(&server)
        .fetch(&request(Portal::Indeed))
        .await
        .expect("fetch should succeed");
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn glassdoor_request_is_capped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("site", "glassdoor"))
        .and(query_param("results_wanted", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "jobs": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let req = ScrapeRequest::new(Portal::Glassdoor, "developer", "Pune", 250);
    test_client(&server).fetch(&req).await.expect("fetch should succeed");
}

// ---------------------------------------------------------------------------
// Status mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_429_maps_to_rate_limited_with_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "17"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch(&request(Portal::Indeed))
        .await
        .unwrap_err();
    assert!(
        matches!(
            err,
            ScraperError::RateLimited {
                retry_after_secs: 17,
                ref portal
            } if portal == "indeed"
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn status_mapping_covers_each_error_variant() {
    let cases: [(u16, fn(&ScraperError) -> bool); 5] = [
        (503, |e| matches!(e, ScraperError::ServerError { status: 503, .. })),
        (400, |e| matches!(e, ScraperError::BadRequest { .. })),
        (401, |e| matches!(e, ScraperError::Unauthorized { status: 401, .. })),
        (403, |e| matches!(e, ScraperError::Unauthorized { status: 403, .. })),
        (404, |e| matches!(e, ScraperError::UnexpectedStatus { status: 404, .. })),
    ];

    for (status, check) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .fetch(&request(Portal::Linkedin))
            .await
            .unwrap_err();
        assert!(check(&err), "status {status} mapped to {err:?}");
    }
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .fetch(&request(Portal::Linkedin))
        .await
        .unwrap_err();
    assert!(matches!(err, ScraperError::Deserialize { .. }), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Under the retry wrapper
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{ "title": "SRE", "location": "Hyderabad" }]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = request(Portal::Linkedin);
    let jobs = execute_with_retry(|| client.fetch(&req), &fast_retry(3), &CancellationToken::new())
        .await
        .expect("third attempt should succeed");

    assert_eq!(jobs.len(), 1);
    assert_eq!(server.received_requests().await.unwrap_or_default().len(), 3);
}

#[tokio::test]
async fn bad_request_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_string("unknown site"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = request(Portal::Linkedin);
    let result =
        execute_with_retry(|| client.fetch(&req), &fast_retry(3), &CancellationToken::new()).await;

    assert!(matches!(
        result,
        Err(RetryError::Fatal(ScraperError::BadRequest { ref message, .. })) if message == "unknown site"
    ));
}

#[tokio::test]
async fn persistent_rate_limit_exhausts_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = request(Portal::Indeed);
    let result =
        execute_with_retry(|| client.fetch(&req), &fast_retry(3), &CancellationToken::new()).await;

    assert!(matches!(
        result,
        Err(RetryError::Exhausted {
            attempts: 3,
            source: ScraperError::RateLimited { .. }
        })
    ));
}
