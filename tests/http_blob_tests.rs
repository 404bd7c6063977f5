//! HTTP blob client behavior against a local stub server.

mod support;

use std::sync::Arc;

use folio::adapter::outbound::blob::HttpBlobStore;
use folio::adapter::outbound::invalidation::NullInvalidator;
use folio::application::ProjectStore;
use folio::error::{Error, StoreError};
use folio::port::{BlobEntry, BlobStore, PutOptions};
use folio::testkit::config::blob;
use serde_json::json;

use support::http_stub::{Reply, StubServer};

fn client(server: &StubServer) -> HttpBlobStore {
    HttpBlobStore::new(&blob(&server.url)).expect("stub url is valid")
}

fn listed(server: &StubServer, key: &str) -> serde_json::Value {
    json!({
        "pathname": key,
        "url": format!("{}/files/{key}", server.url),
        "size": 64,
        "uploadedAt": "2024-03-01T12:00:00.000Z",
    })
}

fn entry(server: &StubServer, key: &str) -> BlobEntry {
    BlobEntry {
        key: key.to_string(),
        url: format!("{}/files/{key}", server.url),
        size: None,
        uploaded_at: None,
    }
}

fn status_of(result: Result<impl std::fmt::Debug, Error>) -> u16 {
    match result {
        Err(Error::Store(StoreError::Status { status, .. })) => status,
        other => panic!("expected a status error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_follows_the_cursor_until_the_last_page() {
    let server = StubServer::start(Vec::new()).await;
    let pages = StubServer::start(vec![
        Reply::json(
            200,
            json!({
                "blobs": [listed(&server, "projects/b.json")],
                "cursor": "c2",
                "hasMore": true,
            }),
        ),
        Reply::json(
            200,
            json!({
                "blobs": [listed(&server, "projects/a.json")],
                "cursor": "c3",
                "hasMore": false,
            }),
        ),
    ])
    .await;

    let entries = client(&pages).list("projects/").await.unwrap();
    let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["projects/b.json", "projects/a.json"]);
    assert_eq!(entries[0].size, Some(64));

    let requests = pages.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.method, "GET");
        assert!(request.query().contains("prefix=projects"));
        assert_eq!(request.header("authorization"), Some("Bearer test-token"));
        assert_eq!(request.header("x-api-version"), Some("7"));
    }
    assert!(!requests[0].query().contains("cursor="));
    assert!(requests[1].query().contains("cursor=c2"));
}

#[tokio::test]
async fn list_stops_when_more_is_claimed_without_a_cursor() {
    let server = StubServer::start(vec![Reply::json(
        200,
        json!({ "blobs": [], "hasMore": true }),
    )])
    .await;

    let entries = client(&server).list("projects/").await.unwrap();
    assert!(entries.is_empty());
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn fetch_of_a_vanished_blob_is_none() {
    let server = StubServer::start(vec![
        Reply::status(404).at("/files/projects/gone.json"),
        Reply::bytes(200, r#"{"id":"p1"}"#).at("/files/projects/p1.json"),
    ])
    .await;
    let store = client(&server);

    let gone = store
        .fetch(&entry(&server, "projects/gone.json"))
        .await
        .unwrap();
    assert!(gone.is_none());

    let found = store
        .fetch(&entry(&server, "projects/p1.json"))
        .await
        .unwrap();
    assert_eq!(found.as_deref(), Some(br#"{"id":"p1"}"#.as_slice()));
}

#[tokio::test]
async fn error_statuses_become_status_errors() {
    let server = StubServer::start(vec![
        Reply::status(503),
        Reply::status(500),
        Reply::status(502),
        Reply::status(403),
    ])
    .await;
    let store = client(&server);

    assert_eq!(status_of(store.list("projects/").await), 503);
    assert_eq!(
        status_of(
            store
                .put("projects/p1.json", b"{}".to_vec(), &PutOptions::json())
                .await
        ),
        500
    );
    assert_eq!(status_of(store.delete("projects/p1.json").await), 502);
    assert_eq!(
        status_of(store.fetch(&entry(&server, "projects/p1.json")).await),
        403
    );
}

#[tokio::test]
async fn put_writes_the_exact_key_with_overwrite_headers() {
    let server = StubServer::start(vec![Reply::json(
        200,
        json!({
            "pathname": "projects/p1.json",
            "url": "https://abc.public.blob.example/projects/p1.json",
            "contentType": "application/json",
        }),
    )])
    .await;

    let stored = client(&server)
        .put(
            "projects/p1.json",
            br#"{"id":"p1"}"#.to_vec(),
            &PutOptions::json(),
        )
        .await
        .unwrap();
    assert_eq!(stored.key, "projects/p1.json");
    assert_eq!(stored.content_type.as_deref(), Some("application/json"));

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "PUT");
    assert_eq!(request.path(), "/projects/p1.json");
    assert_eq!(request.header("authorization"), Some("Bearer test-token"));
    assert_eq!(request.header("x-content-type"), Some("application/json"));
    assert_eq!(request.header("x-access"), Some("public"));
    assert_eq!(request.header("x-add-random-suffix"), Some("0"));
    assert_eq!(request.header("x-allow-overwrite"), Some("1"));
    assert_eq!(request.body, br#"{"id":"p1"}"#);
}

#[tokio::test]
async fn delete_posts_the_key_to_the_delete_endpoint() {
    let server = StubServer::start(vec![Reply::json(200, json!({}))]).await;

    client(&server).delete("projects/p1.json").await.unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path(), "/delete");
    assert_eq!(
        requests[0].body_json(),
        json!({ "urls": ["projects/p1.json"] })
    );
}

#[tokio::test]
async fn catalog_over_http_skips_vanished_and_foreign_blobs() {
    let files = StubServer::start(vec![
        Reply::bytes(
            200,
            r#"{"id":"p1","title":"Folio","description":"Catalog tool"}"#,
        )
        .at("/files/projects/p1.json"),
        Reply::status(404).at("/files/projects/p2.json"),
    ])
    .await;
    let api = StubServer::start(vec![Reply::json(
        200,
        json!({
            "blobs": [
                listed(&files, "projects/p1.json"),
                listed(&files, "projects/p2.json"),
                listed(&files, "projects/cover.png"),
            ],
            "hasMore": false,
        }),
    )])
    .await;

    let store = ProjectStore::new(Arc::new(client(&api)), Arc::new(NullInvalidator));
    let projects = store.list().await.unwrap();

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "Folio");
    let fetched: Vec<String> = files
        .requests()
        .iter()
        .map(|r| r.path().to_string())
        .collect();
    assert_eq!(fetched.len(), 2);
    assert!(!fetched.iter().any(|p| p.ends_with("cover.png")));
}
