//! End-to-end tests for `/api/books` against the assembled router and an
//! in-memory SQLite database.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use bookstore_kernel::{
    settings::{DatabaseSettings, Settings},
    ModuleRegistry,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let settings = Settings {
        database: DatabaseSettings {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        ..Settings::default()
    };

    let pool = bookstore_db::connect(&settings.database).await.unwrap();
    let mut registry = ModuleRegistry::new();
    bookstore_app::register_all(&mut registry, pool.clone());
    bookstore_db::apply_schema(&pool, &registry.collect_schema())
        .await
        .unwrap();

    bookstore_http::build_router(&registry, &settings)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn sample_book() -> Value {
    json!({
        "title": "A",
        "author": "B",
        "price": 9.99,
        "publishedDate": "2020-01-01",
        "genre": "Fiction"
    })
}

async fn create(app: &Router, body: Value) -> Value {
    let response = send(app, Method::POST, "/api/books", Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

async fn assert_not_found(response: Response, id: i64) {
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let envelope = json_body(response).await;
    assert_eq!(envelope["status"], 404);
    assert_eq!(
        envelope["message"],
        format!("Book not found with id: {}", id)
    );
    assert!(envelope["timestamp"].is_string());
}

#[tokio::test]
async fn create_get_delete_walkthrough() {
    let app = app().await;

    let created = create(&app, sample_book()).await;
    let mut expected = sample_book();
    expected["id"] = json!(1);
    assert_eq!(created, expected);

    let response = send(&app, Method::GET, "/api/books/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, expected);

    let response = send(&app, Method::DELETE, "/api/books/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "Book deleted successfully");

    let response = send(&app, Method::GET, "/api/books/1", None).await;
    assert_not_found(response, 1).await;
}

#[tokio::test]
async fn list_returns_every_created_book() {
    let app = app().await;

    let response = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));

    let first = create(&app, sample_book()).await;
    let mut second_body = sample_book();
    second_body["title"] = json!("Second");
    let second = create(&app, second_body).await;

    let response = send(&app, Method::GET, "/api/books", None).await;
    let books = json_body(response).await;
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert!(books.contains(&first));
    assert!(books.contains(&second));
}

#[tokio::test]
async fn update_replaces_every_field() {
    let app = app().await;
    let created = create(&app, sample_book()).await;
    let id = created["id"].as_i64().unwrap();

    let replacement = json!({
        "title": "Neuromancer",
        "author": "William Gibson",
        "price": 14.5,
        "publishedDate": "1984-07-01",
        "genre": "Cyberpunk"
    });
    let uri = format!("/api/books/{}", id);

    let response = send(&app, Method::PUT, &uri, Some(replacement.clone())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let mut expected = replacement;
    expected["id"] = json!(id);
    assert_eq!(json_body(response).await, expected);

    let response = send(&app, Method::GET, &uri, None).await;
    assert_eq!(json_body(response).await, expected);
}

#[tokio::test]
async fn update_of_missing_book_creates_nothing() {
    let app = app().await;

    let response = send(&app, Method::PUT, "/api/books/42", Some(sample_book())).await;
    assert_not_found(response, 42).await;

    let response = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn delete_of_missing_book_has_no_side_effects() {
    let app = app().await;
    let kept = create(&app, sample_book()).await;

    let response = send(&app, Method::DELETE, "/api/books/999", None).await;
    assert_not_found(response, 999).await;

    let response = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(json_body(response).await, json!([kept]));
}

#[tokio::test]
async fn get_of_missing_book_is_not_found() {
    let app = app().await;

    let response = send(&app, Method::GET, "/api/books/7", None).await;
    assert_not_found(response, 7).await;
}

#[tokio::test]
async fn incomplete_payload_is_rendered_as_server_error_envelope() {
    let app = app().await;

    let response = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Only a title" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = json_body(response).await;
    assert_eq!(envelope["status"], 500);
    assert!(envelope["message"].as_str().unwrap().contains("author"));

    let response = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn non_numeric_id_is_rendered_as_server_error_envelope() {
    let app = app().await;

    let response = send(&app, Method::GET, "/api/books/abc", None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await["status"], 500);
}

#[tokio::test]
async fn unsupported_method_is_rendered_as_envelope() {
    let app = app().await;

    let response = send(&app, Method::PATCH, "/api/books/1", Some(sample_book())).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["status"], 405);
    assert_eq!(envelope["message"], "Request method 'PATCH' is not supported");
    assert!(envelope["timestamp"].is_string());
}

#[tokio::test]
async fn unknown_path_is_rendered_as_envelope() {
    let app = app().await;

    let response = send(&app, Method::GET, "/api/bookz", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let envelope = json_body(response).await;
    assert_eq!(envelope["status"], 404);
    assert_eq!(envelope["message"], "No handler found for GET /api/bookz");
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let app = app().await;

    let response = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "ok");

    let response = send(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let spec = json_body(response).await;
    assert!(spec["paths"]["/api/books"]["post"].is_object());
    assert!(spec["paths"]["/api/books/{id}"]["delete"].is_object());
}
