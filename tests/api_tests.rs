//! API tests, driving the router in-process

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{
    api::create_router,
    models::{Book, User},
    repository::Repository,
    AppState,
};

fn user(value: Value) -> User {
    serde_json::from_value(value).expect("valid user")
}

/// Router over one book ("b1") and one user holding it
fn app() -> Router {
    app_with(
        vec![Book::new("b1").with_field("title", "X").with_field("author", "A")],
        vec![user(json!({
            "id": "u1",
            "name": "Alice",
            "issuedBook": "b1",
            "issuedDate": "d1",
            "returnDate": "d2"
        }))],
    )
}

fn app_with(books: Vec<Book>, users: Vec<User>) -> Router {
    create_router(AppState::new(Repository::new(books, users)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    match body {
        Some(body) => send_raw(app, method, uri, "application/json", body.to_string()).await,
        None => {
            let request = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request");
            dispatch(app, request).await
        }
    }
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: impl Into<String>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body.into()))
        .expect("Failed to build request");
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn assert_failure(body: &Value, message: &str) {
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], message);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = get(&app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_list_books_keeps_insertion_order() {
    let app = app_with(
        vec![Book::new("b2"), Book::new("b1"), Book::new("b3")],
        vec![],
    );

    let (status, body) = get(&app, "/books").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("message").is_none());
    let ids: Vec<_> = body["data"]
        .as_array()
        .expect("data is an array")
        .iter()
        .map(|b| b["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["b2", "b1", "b3"]);
}

#[tokio::test]
async fn test_get_book_is_idempotent() {
    let app = app();

    let first = get(&app, "/books/b1").await;
    let second = get(&app, "/books/b1").await;

    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(first.1["data"], json!({ "id": "b1", "title": "X", "author": "A" }));
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_get_book_not_found() {
    let (status, body) = get(&app(), "/books/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, "Book not found");
}

#[tokio::test]
async fn test_create_without_body() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "No data was provided");

    let (status, body) = send(&app, Method::POST, "/books", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "No data was provided");
}

#[tokio::test]
async fn test_create_rejects_duplicate_id() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "data": { "id": "b1", "title": "X" } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "Book already exists with the same ID");

    let (_, body) = get(&app, "/books").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_accepts_new_id() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/books",
        Some(json!({ "data": { "id": "b2", "title": "Y" } })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let books = body["data"].as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[1], json!({ "id": "b2", "title": "Y" }));

    let (status, body) = get(&app, "/books/b2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Y");
}

#[tokio::test]
async fn test_create_rejects_book_without_id() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/books",
        Some(json!({ "data": { "title": "No id" } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "Book data must be an object with a string id");
}

#[tokio::test]
async fn test_update_merges_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/b1",
        Some(json!({ "data": { "title": "Z" } })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!({ "id": "b1", "title": "Z", "author": "A" }));

    let (_, body) = get(&app, "/books/b1").await;
    assert_eq!(body["data"]["title"], "Z");
}

#[tokio::test]
async fn test_update_not_found() {
    let (status, body) = send(
        &app(),
        Method::PUT,
        "/books/nope",
        Some(json!({ "data": { "title": "Z" } })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, "Book not found with that particular ID");
}

#[tokio::test]
async fn test_update_without_data_returns_book_unchanged() {
    let (status, body) = send(&app(), Method::PUT, "/books/b1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "id": "b1", "title": "X", "author": "A" }));
}

#[tokio::test]
async fn test_update_rejects_id_collision() {
    let app = app_with(vec![Book::new("b1"), Book::new("b2")], vec![]);
    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/b1",
        Some(json!({ "data": { "id": "b2" } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "Book already exists with the same ID");

    let (status, _) = get(&app, "/books/b1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_issued_books_join() {
    let (status, body) = get(&app(), "/books/issued").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!([{
            "id": "b1",
            "title": "X",
            "author": "A",
            "issuedBy": "Alice",
            "issuedDate": "d1",
            "returnDate": "d2"
        }])
    );
}

#[tokio::test]
async fn test_issued_books_skip_dangling_reference() {
    let app = app_with(
        vec![Book::new("b1")],
        vec![
            user(json!({ "id": "u1", "name": "Ghost", "issuedBook": "missing" })),
            user(json!({ "id": "u2", "name": "Bob", "issuedBook": "b1" })),
        ],
    );

    let (status, body) = get(&app, "/books/issued").await;

    assert_eq!(status, StatusCode::OK);
    let issued = body["data"].as_array().unwrap();
    assert_eq!(issued.len(), 1);
    assert_eq!(issued[0]["issuedBy"], "Bob");
}

#[tokio::test]
async fn test_issued_books_empty() {
    let app = app_with(
        vec![Book::new("b1")],
        vec![
            user(json!({ "id": "u1", "name": "Alice" })),
            user(json!({ "id": "u2", "name": "Bob", "issuedBook": "" })),
        ],
    );

    let (status, body) = get(&app, "/books/issued").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, "No books have been issued");
}

#[tokio::test]
async fn test_users_are_listed_and_fetched() {
    let app = app();

    let (status, body) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["name"], "Alice");

    let (status, body) = get(&app, "/users/u1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["issuedBook"], "b1");

    let (status, body) = get(&app, "/users/u9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, "User doesn't exist");
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = get(&app(), "/authors").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_failure(&body, "This route doesn't exist");
}

#[tokio::test]
async fn test_update_with_malformed_json_is_rejected() {
    let app = app();
    let (status, body) = send_raw(
        &app,
        Method::PUT,
        "/books/b1",
        "application/json",
        r#"{"data": {"title": "Z""#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Malformed JSON body"));

    let (_, body) = get(&app, "/books/b1").await;
    assert_eq!(body["data"]["title"], "X");
}

#[tokio::test]
async fn test_create_with_malformed_json_is_rejected() {
    let app = app();
    let (status, body) =
        send_raw(&app, Method::POST, "/books", "application/json", r#"{"data": "#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("Malformed JSON body"));

    let (_, body) = get(&app, "/books").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_or_non_json_body_carries_no_data() {
    let app = app();

    let (status, body) = send_raw(&app, Method::PUT, "/books/b1", "application/json", "  ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "X");

    let (status, body) = send_raw(
        &app,
        Method::PUT,
        "/books/b1",
        "text/plain",
        r#"{"data": {"title": "Z"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "X");

    let (status, body) = send_raw(&app, Method::POST, "/books", "application/json", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "No data was provided");
}

#[tokio::test]
async fn test_update_rejects_null_id() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/books/b1",
        Some(json!({ "data": { "id": null } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_failure(&body, "Book id must be a string");
}
