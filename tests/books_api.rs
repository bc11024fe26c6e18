//! End-to-end tests of the `/api/books` surface against the in-memory store.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use librarian_app::bootstrap;
use librarian_app::books::models::{Book, BookId, BookSummary};
use librarian_app::books::store::{BookStore, MemoryBookStore, StoreError};
use librarian_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

const ABSENT_ID: &str = "000000000000000000000000";

fn test_app() -> Router {
    bootstrap::app(Arc::new(MemoryBookStore::new()), &Settings::default())
}

struct TestResponse {
    status: StatusCode,
    text: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("response body should be JSON")
    }
}

async fn send(app: &Router, method: Method, uri: &str, form: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(form) => {
            builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        text: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn create(app: &Router, title: &str) -> String {
    let response = send(app, Method::POST, "/api/books", Some(&format!("title={title}"))).await;
    assert_eq!(response.status, StatusCode::OK);
    response.json()["_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_returns_id_and_title() {
    let app = test_app();

    let response = send(&app, Method::POST, "/api/books", Some("title=test+book+title")).await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["title"], "test book title");
    assert!(BookId::parse(body["_id"].as_str().unwrap()).is_some());
    assert_eq!(body.as_object().unwrap().len(), 2);
}

#[tokio::test]
async fn create_accepts_json_bodies() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "title": "Dune" }).to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["title"], "Dune");
}

#[tokio::test]
async fn json_media_types_are_recognised_in_any_form() {
    let app = test_app();

    for content_type in ["Application/JSON", "application/vnd.api+json"] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/books")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(json!({ "title": "x" }).to_string()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{content_type}");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["title"], "x");
    }
}

#[tokio::test]
async fn trailing_slashes_reach_the_same_routes() {
    let app = test_app();
    let id = create(&app, "Dune").await;

    let listed = send(&app, Method::GET, "/api/books/", None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json()[0]["_id"], id.as_str());

    let fetched = send(&app, Method::GET, &format!("/api/books/{id}/"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json()["title"], "Dune");
}

#[tokio::test]
async fn create_without_title_is_rejected_and_stores_nothing() {
    let app = test_app();

    for form in [Some("invalidProp=invalid+value"), Some("title="), None] {
        let response = send(&app, Method::POST, "/api/books", form).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.text, "missing required field title");
    }

    let listed = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(listed.json(), json!([]));
}

#[tokio::test]
async fn list_reports_comment_counts() {
    let app = test_app();
    let first = create(&app, "first").await;
    let second = create(&app, "second").await;
    for comment in ["a", "b", "c"] {
        let uri = format!("/api/books/{second}");
        let response = send(&app, Method::POST, &uri, Some(&format!("comment={comment}"))).await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = send(&app, Method::GET, "/api/books", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!([
            { "_id": first, "title": "first", "commentcount": 0 },
            { "_id": second, "title": "second", "commentcount": 3 },
        ])
    );
}

#[tokio::test]
async fn created_book_round_trips_with_no_comments() {
    let app = test_app();
    let id = create(&app, "Neuromancer").await;

    let response = send(&app, Method::GET, &format!("/api/books/{id}"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({ "_id": id, "title": "Neuromancer", "comments": [] })
    );
}

#[tokio::test]
async fn appending_the_same_comment_twice_keeps_both() {
    let app = test_app();
    let id = create(&app, "Dune").await;
    let uri = format!("/api/books/{id}");

    let first = send(&app, Method::POST, &uri, Some("comment=nice")).await;
    assert_eq!(first.json()["comments"], json!(["nice"]));

    let second = send(&app, Method::POST, &uri, Some("comment=nice")).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(
        second.json(),
        json!({ "_id": id, "title": "Dune", "comments": ["nice", "nice"] })
    );
}

#[tokio::test]
async fn comment_is_checked_before_the_book() {
    let app = test_app();
    let id = create(&app, "Dune").await;

    for uri in [
        format!("/api/books/{id}"),
        format!("/api/books/{ABSENT_ID}"),
        "/api/books/not-an-id".to_string(),
    ] {
        let response = send(&app, Method::POST, &uri, None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.text, "missing required field comment");
    }
}

#[tokio::test]
async fn absent_and_malformed_ids_look_the_same() {
    let app = test_app();

    for id in [ABSENT_ID, "64c765af111a2e1897790a8b", "not-an-id", "123"] {
        let uri = format!("/api/books/{id}");

        let get = send(&app, Method::GET, &uri, None).await;
        let post = send(&app, Method::POST, &uri, Some("comment=hello")).await;
        let delete = send(&app, Method::DELETE, &uri, None).await;

        for response in [get, post, delete] {
            assert_eq!(response.status, StatusCode::BAD_REQUEST, "id {id}");
            assert_eq!(response.text, "no book exists", "id {id}");
        }
    }
}

#[tokio::test]
async fn deleted_book_is_gone() {
    let app = test_app();
    let id = create(&app, "Dune").await;
    let uri = format!("/api/books/{id}");

    let deleted = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.text, "delete book successful");

    let fetched = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched.status, StatusCode::BAD_REQUEST);
    assert_eq!(fetched.text, "no book exists");

    let again = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(again.text, "no book exists");
}

#[tokio::test]
async fn delete_all_empties_the_collection_every_time() {
    let app = test_app();
    create(&app, "a").await;
    create(&app, "b").await;

    for _ in 0..2 {
        let response = send(&app, Method::DELETE, "/api/books", None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.text, "complete delete successful");
    }

    let listed = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(listed.json(), json!([]));
}

/// Store whose every operation fails, standing in for a lost connection.
struct UnreachableStore;

fn unreachable() -> StoreError {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    StoreError::Database(mongodb::error::Error::from(io))
}

#[async_trait]
impl BookStore for UnreachableStore {
    fn backend(&self) -> &'static str {
        "unreachable"
    }

    async fn list(&self) -> Result<Vec<BookSummary>, StoreError> {
        Err(unreachable())
    }

    async fn create(&self, _title: &str) -> Result<Book, StoreError> {
        Err(unreachable())
    }

    async fn find(&self, _id: &BookId) -> Result<Option<Book>, StoreError> {
        Err(unreachable())
    }

    async fn append_comment(
        &self,
        _id: &BookId,
        _comment: &str,
    ) -> Result<Option<Book>, StoreError> {
        Err(unreachable())
    }

    async fn delete(&self, _id: &BookId) -> Result<bool, StoreError> {
        Err(unreachable())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        Err(unreachable())
    }
}

#[tokio::test]
async fn store_failures_are_generic_500s() {
    let app = bootstrap::app(Arc::new(UnreachableStore), &Settings::default());

    let cases = [
        (Method::GET, "/api/books".to_string(), None),
        (Method::POST, "/api/books".to_string(), Some("title=Dune")),
        (Method::DELETE, "/api/books".to_string(), None),
        (Method::GET, format!("/api/books/{ABSENT_ID}"), None),
        (
            Method::POST,
            format!("/api/books/{ABSENT_ID}"),
            Some("comment=x"),
        ),
        (Method::DELETE, format!("/api/books/{ABSENT_ID}"), None),
    ];

    for (method, uri, form) in cases {
        let response = send(&app, method, &uri, form).await;
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(response.text, "internal server error");
    }
}

#[tokio::test]
async fn openapi_document_lists_book_routes() {
    let app = test_app();

    let response = send(&app, Method::GET, "/docs/openapi.json", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let spec = response.json();
    assert!(spec["paths"]["/api/books"]["post"].is_object());
    assert!(spec["paths"]["/api/books/{id}"]["delete"].is_object());
}
