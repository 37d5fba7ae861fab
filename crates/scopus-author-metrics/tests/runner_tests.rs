//! End-to-end runs against a mocked Scopus API.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scopus_author_metrics::runner::{self, RunOptions};
use scopus_author_metrics::{AffiliationPolicy, AppError, AuthorResolver, Config, ScopusClient};

fn setup_resolver(mock_server: &MockServer) -> AuthorResolver {
    let client = ScopusClient::new(Config::for_testing(&mock_server.uri())).unwrap();
    AuthorResolver::new(Arc::new(client), AffiliationPolicy::default())
}

async fn mount_jane_smith(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/content/search/author"))
        .and(query_param("query", "AUTHLASTNAME(Smith) AND AUTHFIRST(Jane)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search-results": {
                "opensearch:totalResults": "2",
                "entry": [
                    {
                        "eid": "9-s2.0-100",
                        "preferred-name": {"surname": "Smith", "given-name": "Jane"},
                        "affiliation-current": {
                            "affiliation-name": "Duke University",
                            "affiliation-city": "Durham",
                            "affiliation-country": "United States"
                        }
                    },
                    {
                        "eid": "9-s2.0-200",
                        "preferred-name": {"surname": "Smith", "given-name": "Jane A."},
                        "affiliation-current": {
                            "affiliation-name": "North Carolina State University",
                            "affiliation-city": "Raleigh",
                            "affiliation-country": "United States"
                        }
                    }
                ]
            }
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/content/author/author_id/200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "author-retrieval-response": [{
                "h-index": "18",
                "coredata": {"document-count": "64", "citation-count": "1203"}
            }]
        })))
        .expect(1)
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_run_writes_report_and_summary() {
    let mock_server = MockServer::start().await;
    mount_jane_smith(&mock_server).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("author_metrics.xlsx");
    let options = RunOptions { output: &output, sheet_name: "metrics", concurrency: 1 };

    let names = vec!["Jane A Smith".to_string(), "X".to_string()];
    let summary = runner::run(&setup_resolver(&mock_server), &names, &options).await.unwrap();

    assert_eq!(summary.found, 1);
    assert_eq!(summary.total, 2);
    assert_eq!(summary.output, output);
    assert!(output.exists());
    assert!(summary.to_string().starts_with("Found 1 / 2 authors to "));
}

#[tokio::test]
async fn test_run_twice_keeps_both_reports() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/author"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "search-results": {
                "opensearch:totalResults": "0",
                "entry": [{"error": "Result set was empty"}]
            }
        })))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("report.xlsx");
    let options = RunOptions { output: &output, sheet_name: "metrics", concurrency: 2 };
    let resolver = setup_resolver(&mock_server);
    let names = vec!["Nobody Known".to_string()];

    let first = runner::run(&resolver, &names, &options).await.unwrap();
    let second = runner::run(&resolver, &names, &options).await.unwrap();

    assert_eq!(first.found, 0);
    assert_eq!(first.output, output);
    assert_eq!(second.output, dir.path().join("report(1).xlsx"));
    assert!(first.output.exists() && second.output.exists());
}

#[tokio::test]
async fn test_api_failure_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/content/search/author"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API Key"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("author_metrics.xlsx");
    let options = RunOptions { output: &output, sheet_name: "metrics", concurrency: 1 };

    let names = vec!["Jane Smith".to_string()];
    let err = runner::run(&setup_resolver(&mock_server), &names, &options).await.unwrap_err();

    assert!(matches!(err, AppError::Client(_)));
    assert!(err.to_user_message().contains("SCOPUS_API_KEY"));
    assert!(!output.exists());
}
