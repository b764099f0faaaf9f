// Router-level tests driven with tower::ServiceExt::oneshot — no real
// listener, no network.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use fortuna::moderation::{AdmissionPipeline, Lexicon, ModerationProfile};
use fortuna::store::{Fortune, FortuneStore, MemoryStore};
use fortuna::web::{build_router, AppState};
use tower::ServiceExt;

fn test_state() -> (Arc<MemoryStore>, AppState) {
    let store = Arc::new(MemoryStore::new());
    let pipeline = AdmissionPipeline::new(
        Lexicon::build(),
        ModerationProfile::strict(),
        store.clone() as Arc<dyn FortuneStore>,
        None,
    );
    let state = AppState {
        store: store.clone(),
        pipeline: Arc::new(pipeline),
    };
    (store, state)
}

fn post_json(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/fortunes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let (_, state) = test_state();
    let response = build_router(state)
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn list_returns_fortunes_newest_first() {
    let (store, state) = test_state();
    store.append_if_absent(Fortune::new("older")).await.unwrap();
    store.append_if_absent(Fortune::new("newer")).await.unwrap();

    let response = build_router(state)
        .oneshot(Request::get("/api/fortunes").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let fortunes = body["fortunes"].as_array().unwrap();
    assert_eq!(fortunes.len(), 2);
    assert_eq!(fortunes[0]["text"], "newer");
    assert_eq!(fortunes[1]["text"], "older");
    assert_eq!(fortunes[0]["isDefault"], false);
    assert!(fortunes[0]["createdAt"].is_string());
}

#[tokio::test]
async fn valid_submission_is_accepted() {
    let (store, state) = test_state();
    let response = build_router(state)
        .oneshot(post_json(r#"{"text":"Good luck finds you"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["isDuplicate"], false);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn duplicate_submission_reports_the_flag_without_writing() {
    let (store, state) = test_state();
    let router = build_router(state);

    router
        .clone()
        .oneshot(post_json(r#"{"text":"Good luck finds you"}"#))
        .await
        .unwrap();
    let response = router
        .oneshot(post_json(r#"{"text":"GOOD LUCK FINDS YOU"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["isDuplicate"], true);
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn rejection_is_a_client_fault_with_a_reason() {
    let (store, state) = test_state();
    let response = build_router(state)
        .oneshot(post_json(r#"{"text":"you suck eggs"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Your fortune contains inappropriate language");
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_text_field_is_a_client_fault() {
    let (_, state) = test_state();
    let response = build_router(state)
        .oneshot(post_json(r#"{}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid fortune text");
}
