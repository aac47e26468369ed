//! End-to-end tests against a mock search service

use ffs_client::schema::SchemaRegistry;
use ffs_client::template::TemplateContext;
use ffs_client::{ClientConfig, Error, FfsClient, FilterClause, FilterGroup, Operator, Query};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> ClientConfig {
    let mut ctx = TemplateContext::new();
    ctx.set_env("FFS_PASSWORD", "hunter2");

    let yaml = format!(
        r"
auth_url: {uri}/v1/oauth
search_url: {uri}/forensic-search/queryservice/api/v1/fileevent
username: analyst@example.com
password: '{{{{ env.FFS_PASSWORD }}}}'
http:
  timeout_secs: 5
",
        uri = server.uri()
    );
    ClientConfig::from_yaml_str(&yaml, &ctx).unwrap()
}

fn query() -> Query {
    Query::builder()
        .group(FilterGroup::all(vec![FilterClause::new(
            Operator::Is,
            "fileName",
            "secret.txt",
        )]))
        .page_size(2)
        .build()
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/oauth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-abc",
            "token_type": "bearer",
            "expires_in": 900
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_walks_every_page() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/forensic-search/queryservice/api/v1/fileevent"))
        .and(body_partial_json(json!({"pgToken": "p2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fileEvents": [{"eventId": "e3", "fileName": "secret.txt"}],
            "nextPgToken": "",
            "totalCount": 3
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/forensic-search/queryservice/api/v1/fileevent"))
        .and(header("Authorization", "v3_user_token tok-abc"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fileEvents": [
                {"eventId": "e1", "fileName": "secret.txt", "fileSize": 10},
                {"eventId": "e2", "fileName": "secret.txt", "eventTimestamp": "2021-04-01T10:15:30.123Z"}
            ],
            "nextPgToken": "p2",
            "totalCount": 3
        })))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    let client = FfsClient::from_config(config(&server)).unwrap();
    let credential = client.authenticate().await.unwrap();
    let events = client.search(&query(), &credential).await.unwrap();

    let ids: Vec<_> = events.iter().filter_map(|e| e.event_id.as_deref()).collect();
    assert_eq!(ids, vec!["e1", "e2", "e3"]);
    assert_eq!(events[0].file_size, Some(10));
    assert!(events[1].event_timestamp.is_some());
    assert_eq!(events[2].file_size, None);
}

#[tokio::test]
async fn test_query_problems_surface_as_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/forensic-search/queryservice/api/v1/fileevent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "fileEvents": [],
            "problems": [{
                "type": "SEARCH_TERM_NOT_SUPPORTED",
                "description": "fileName is not searchable",
                "badFilter": {"operator": "IS", "term": "fileName", "value": "secret.txt"}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = FfsClient::from_config(config(&server)).unwrap();
    let credential = client.authenticate().await.unwrap();
    let err = client.search(&query(), &credential).await.unwrap_err();

    match err {
        Error::QueryProblems { problems, .. } => {
            assert_eq!(problems.len(), 1);
            assert_eq!(
                problems[0].problem_type.as_deref(),
                Some("SEARCH_TERM_NOT_SUPPORTED")
            );
        }
        other => panic!("expected query problems, got {other:?}"),
    }
}

#[tokio::test]
async fn test_export_decodes_csv() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    let registry = SchemaRegistry::csv_export();
    let headers: Vec<&str> = registry.headers().collect();
    let mut row = vec![String::new(); headers.len()];
    let set = |row: &mut Vec<String>, name: &str, value: &str| {
        let index = headers.iter().position(|h| *h == name).unwrap();
        row[index] = value.to_string();
    };
    set(&mut row, "Event ID", "csv-1");
    set(&mut row, "Filename", "secret.txt");
    set(&mut row, "File size (bytes)", "2048");
    set(&mut row, "Shared", "FALSE");

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&headers).unwrap();
    writer.write_record(&row).unwrap();
    let body = writer.into_inner().unwrap();

    Mock::given(method("POST"))
        .and(path("/forensic-search/queryservice/api/v1/fileevent"))
        .and(header("Accept", "text/csv"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/csv"))
        .expect(1)
        .mount(&server)
        .await;

    let client = FfsClient::from_config(config(&server)).unwrap();
    let credential = client.authenticate().await.unwrap();
    let events = client.export_csv(&query(), &credential).await.unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_id.as_deref(), Some("csv-1"));
    assert_eq!(events[0].file_size, Some(2048));
    assert_eq!(events[0].shared, Some(false));
    assert_eq!(events[0].file_owner, None);
}

#[tokio::test]
async fn test_export_rejects_drifted_header() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/forensic-search/queryservice/api/v1/fileevent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("Event ID,Surprise\ncsv-1,x\n", "text/csv"),
        )
        .mount(&server)
        .await;

    let client = FfsClient::from_config(config(&server)).unwrap();
    let credential = client.authenticate().await.unwrap();
    let err = client.export_csv(&query(), &credential).await.unwrap_err();

    assert!(matches!(err, Error::SchemaDrift { .. }));
}

#[tokio::test]
async fn test_service_error_status() {
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/forensic-search/queryservice/api/v1/fileevent"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let client = FfsClient::from_config(config(&server)).unwrap();
    let credential = client.authenticate().await.unwrap();
    let err = client.search(&query(), &credential).await.unwrap_err();

    match err {
        Error::Transport { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "unavailable");
        }
        other => panic!("expected transport error, got {other:?}"),
    }
}
