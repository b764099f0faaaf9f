// Web server — Axum JSON API for the fortune wall.
//
// Two routes do the work: GET /api/fortunes returns the wall newest
// first, POST /api/fortunes runs a submission through the admission
// pipeline. Everything else is plumbing.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::moderation::AdmissionPipeline;
use crate::store::FortuneStore;

pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FortuneStore>,
    pub pipeline: Arc<AdmissionPipeline>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    store: Arc<dyn FortuneStore>,
    pipeline: Arc<AdmissionPipeline>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState { store, pipeline };
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Fortuna listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Router construction is public so integration tests can drive it with
/// tower::ServiceExt::oneshot.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/fortunes", get(handlers::list_fortunes))
        .route("/api/fortunes", post(handlers::submit_fortune))
        .route("/health", get(health))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Deployment health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
