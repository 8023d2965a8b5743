//! Wire-level tests for the Firecrawl service client
//!
//! These tests use wiremock to stand in for the crawl API.

use crawl_harvest::config::ServiceConfig;
use crawl_harvest::crawler::{HarvestOptions, Harvester, PollSettings};
use crawl_harvest::service::{CrawlRequest, CrawlService, FirecrawlService, JobHandle};
use crawl_harvest::state::JobStatus;
use crawl_harvest::ServiceError;
use serde_json::json;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_service(server: &MockServer) -> FirecrawlService {
    let config = ServiceConfig {
        api_url: server.uri(),
        request_timeout: 5,
        api_key: "fc-test".to_string(),
    };
    FirecrawlService::new(&config).expect("Failed to build service")
}

#[tokio::test]
async fn test_start_job_sends_markdown_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .and(header("authorization", "Bearer fc-test"))
        .and(body_json(json!({
            "url": "https://example.com/",
            "limit": 7,
            "scrapeOptions": { "formats": ["markdown"] }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "id": "job-42", "url": "x"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = create_service(&server);
    let ack = service
        .start_job(&CrawlRequest::new("https://example.com/", 7))
        .await
        .expect("start_job failed");

    assert!(ack.success);
    assert_eq!(ack.job_id.as_deref(), Some("job-42"));
}

#[tokio::test]
async fn test_start_job_rejection_keeps_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(ResponseTemplate::new(402).set_body_string(r#"{"error":"Payment required"}"#))
        .mount(&server)
        .await;

    let service = create_service(&server);
    let ack = service
        .start_job(&CrawlRequest::new("https://example.com/", 10))
        .await
        .expect("A rejection is not a transport error");

    assert!(!ack.success);
    assert!(ack.job_id.is_none());
    assert!(ack.raw.contains("Payment required"));
}

#[tokio::test]
async fn test_get_status_parses_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "scraping",
            "completed": 2,
            "total": 5,
            "data": [
                {"markdown": "# A", "metadata": {"sourceURL": "https://example.com/a"}}
            ]
        })))
        .mount(&server)
        .await;

    let service = create_service(&server);
    let snapshot = service
        .get_status(&JobHandle::new("job-1"))
        .await
        .expect("get_status failed");

    assert_eq!(snapshot.status, JobStatus::Scraping);
    assert_eq!(snapshot.completed, Some(2));
    assert_eq!(snapshot.total, Some(5));
    assert_eq!(snapshot.pages.unwrap().len(), 1);
}

#[tokio::test]
async fn test_get_status_empty_bodies() {
    for body in ["", "   ", "null", "{}"] {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/crawl/job-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let service = create_service(&server);
        let result = service.get_status(&JobHandle::new("job-1")).await;

        assert!(
            matches!(result, Err(ServiceError::EmptyBody)),
            "Expected EmptyBody for {:?}, got {:?}",
            body,
            result
        );
    }
}

#[tokio::test]
async fn test_get_status_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let service = create_service(&server);
    let result = service.get_status(&JobHandle::new("job-1")).await;

    assert!(matches!(result, Err(ServiceError::Decode(_))));
}

#[tokio::test]
async fn test_get_status_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    let service = create_service(&server);
    let result = service.get_status(&JobHandle::new("job-1")).await;

    assert!(matches!(result, Err(ServiceError::Api { status: 503, .. })));
}

#[tokio::test]
async fn test_full_result_follows_next_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "completed",
            "data": [
                {"markdown": "one", "metadata": {"sourceURL": "https://example.com/1"}}
            ],
            "next": format!("{}/v1/crawl/job-1/page/2", base)
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1/page/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "completed",
            "data": [
                {"markdown": "two", "metadata": {"sourceURL": "https://example.com/2"}},
                {"metadata": {"sourceURL": "https://example.com/3"}}
            ],
            "next": format!("{}/v1/crawl/job-1/page/3", base)
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1/page/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "completed",
            "data": [
                {"markdown": "four", "metadata": {"sourceURL": "https://example.com/4"}}
            ]
        })))
        .mount(&server)
        .await;

    let service = create_service(&server);
    let result = service
        .get_full_result(&JobHandle::new("job-1"))
        .await
        .expect("get_full_result failed");

    assert!(result.success);
    let urls: Vec<String> = result
        .pages
        .unwrap()
        .into_iter()
        .filter_map(|p| p.source_url)
        .collect();
    assert_eq!(
        urls,
        vec![
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3",
            "https://example.com/4",
        ]
    );
}

#[tokio::test]
async fn test_full_result_without_success_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "data": [
                {"markdown": "one", "metadata": {"sourceURL": "https://example.com/1"}}
            ]
        })))
        .mount(&server)
        .await;

    let service = create_service(&server);
    let result = service
        .get_full_result(&JobHandle::new("job-1"))
        .await
        .expect("get_full_result failed");

    // No flag and no error key: the data is trusted
    assert!(result.success);
    assert_eq!(result.pages.unwrap().len(), 1);
}

#[tokio::test]
async fn test_full_result_with_error_key_is_not_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "completed",
            "error": "result expired",
            "data": []
        })))
        .mount(&server)
        .await;

    let service = create_service(&server);
    let result = service
        .get_full_result(&JobHandle::new("job-1"))
        .await
        .expect("get_full_result failed");

    assert!(!result.success);
}

#[tokio::test]
async fn test_full_result_explicit_false_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "status": "completed",
            "data": []
        })))
        .mount(&server)
        .await;

    let service = create_service(&server);
    let result = service
        .get_full_result(&JobHandle::new("job-1"))
        .await
        .expect("get_full_result failed");

    assert!(!result.success);
}

#[tokio::test]
async fn test_start_job_success_false_with_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "error": "Invalid URL"})),
        )
        .mount(&server)
        .await;

    let service = create_service(&server);
    let ack = service
        .start_job(&CrawlRequest::new("https://example.com/", 10))
        .await
        .expect("A rejection is not a transport error");

    assert!(!ack.success);
    assert!(ack.job_id.is_none());
    assert!(ack.raw.contains("Invalid URL"));
}

#[tokio::test]
async fn test_harvest_end_to_end_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "id": "job-9"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/crawl/job-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "status": "completed",
            "completed": 2,
            "total": 2,
            "data": [
                {"markdown": "# Home", "metadata": {"sourceURL": "https://example.com/"}},
                {"markdown": "", "metadata": {"sourceURL": "https://example.com/blank"}}
            ]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("site").join("full_llms.txt");
    let options = HarvestOptions {
        request: CrawlRequest::new("https://example.com/", 10),
        output_path: out.clone(),
        poll: PollSettings::new(Duration::from_millis(10)),
    };

    let harvester = Harvester::new(create_service(&server), options);
    let report = harvester.run().await.expect("Harvest failed");

    assert_eq!(report.job_id, "job-9");
    assert_eq!(report.pages_written, 1);
    assert!(report.complete);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "# Source URL: https://example.com/\n\n# Home\n\n---\n\n"
    );
}
