use std::time::Duration;

use wiremock::matchers::{body_json_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobcross_common::api::{ApiClient, ApiConfig};
use jobcross_common::error::CommonError;
use jobcross_common::model::SearchRequest;

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    })
    .expect("client builds")
}

#[tokio::test]
async fn search_decodes_jobs_and_stats() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "jobs": [
                {"title": "Backend Engineer", "company": "Acme", "location": "Denver, CO", "match_score": 72.5},
                {"title": "Data Analyst", "company": "Globex"}
            ],
            "top_matches": [],
            "stats": {"total_jobs": 2, "high_matches": 1},
            "csv_report": "reports/run.csv",
            "html_report": "reports/run.html"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = SearchRequest {
        skills: vec!["rust".into()],
        interests: vec![],
        location: "Denver, CO".into(),
        us_wide: true,
    };

    let response = client.search(&request).await.expect("search succeeds");
    assert_eq!(response.jobs.len(), 2);
    assert_eq!(response.jobs[0].score(), 72.5);
    assert_eq!(response.jobs[1].score(), 0.0);
    assert_eq!(response.stats.as_ref().unwrap().total_jobs, 2);
    assert_eq!(response.csv_report.as_deref(), Some("reports/run.csv"));
}

#[tokio::test]
async fn search_error_envelope_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Skills are required"
            })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = SearchRequest {
        skills: vec!["rust".into()],
        interests: vec![],
        location: String::new(),
        us_wide: true,
    };

    let err = client.search(&request).await.expect_err("must fail");
    match err {
        CommonError::Api { status, message } => {
            assert_eq!(status.as_u16(), 400);
            assert_eq!(message, "Skills are required");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn company_lookup_url_encodes_the_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mentors/company/Acme%20%26%20Sons"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "company": "Acme & Sons",
            "mentors": [{"full_name": "Ada Lovelace", "title": "Engineer"}],
            "count": 1
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .mentors_for_company("  Acme & Sons  ")
        .await
        .expect("lookup succeeds");
    assert_eq!(result.count, 1);
    assert_eq!(result.mentors[0].display_name(), "Ada Lovelace");
}

#[tokio::test]
async fn remove_bookmark_sends_job_id_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/bookmarks"))
        .and(body_json_string(r#"{"job_id":"Dev_Acme"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "removed": true
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ack = client.remove_bookmark("Dev_Acme").await.expect("removes");
    assert!(ack.success);
    assert_eq!(ack.removed, Some(true));
}

#[tokio::test]
async fn report_download_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/reports/run.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("title,company\n"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let bytes = client.download_report("run.csv").await.expect("downloads");
    assert_eq!(bytes, b"title,company\n");
}
