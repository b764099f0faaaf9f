// GET /api/fortunes and POST /api/fortunes.
//
// Response contract: rejections are client faults (400) carrying the
// human-readable reason; store failures are server faults (500); a
// duplicate submission is a success with isDuplicate=true and no write.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::moderation::Admission;
use crate::web::{api_error, AppState};

/// GET /api/fortunes — the full wall, newest first.
pub async fn list_fortunes(State(state): State<AppState>) -> Response {
    match state.store.get_all().await {
        Ok(fortunes) => Json(serde_json::json!({ "fortunes": fortunes })).into_response(),
        Err(error) => {
            error!(%error, "Failed to fetch fortunes");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch fortunes")
        }
    }
}

#[derive(Deserialize)]
pub struct SubmitRequest {
    // Option so a missing or null field is a clean 400, not a parse error
    text: Option<String>,
}

/// POST /api/fortunes — run a submission through the admission pipeline.
pub async fn submit_fortune(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Response {
    let Some(text) = request.text else {
        return api_error(StatusCode::BAD_REQUEST, "Invalid fortune text");
    };

    match state.pipeline.submit(&text).await {
        Ok(Admission::Accepted(_)) => {
            Json(serde_json::json!({ "success": true, "isDuplicate": false })).into_response()
        }
        Ok(Admission::Duplicate) => {
            Json(serde_json::json!({ "success": true, "isDuplicate": true })).into_response()
        }
        Ok(Admission::Rejected(reason)) => {
            api_error(StatusCode::BAD_REQUEST, &reason.to_string())
        }
        Err(error) => {
            error!(%error, "Failed to add fortune");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to add fortune")
        }
    }
}
