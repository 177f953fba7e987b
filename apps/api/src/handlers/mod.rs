//! # HTTP Handlers
//!
//! One module per resource. Every account-scoped handler follows the same
//! shape:
//!
//! ```text
//! Session + Path(user_id) ──► session.authorize(&user_id)?
//!                                     │
//!                                     ▼
//!          ApiJson(body) ──► validate (stockroom-core) ──► repository call
//!                                                                │
//!                                                                ▼
//!                                             Json(response) | ApiError
//! ```

pub mod account;
pub mod client;
pub mod invoice;
pub mod product;
pub mod report;

use axum::extract::{FromRequest, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;
use crate::AppState;

/// JSON body extractor that reports malformed bodies as `{ "error": ... }`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Body of responses that only carry a confirmation.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Response {
    if state.store.health_check().await {
        Json(json!({ "status": "ok" })).into_response()
    } else {
        tracing::warn!(data_dir = %state.store.data_dir().display(), "Health check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
            .into_response()
    }
}
