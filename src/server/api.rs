//! Report endpoint handlers.

use std::{any::Any, sync::Arc};

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::core::{engine::Engine, error::LookupError};

const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub email: Option<String>,
}

/// GET /lookup?email=<address>
pub async fn lookup(
    State(engine): State<Arc<Engine>>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Response, LookupError> {
    let email = query
        .ok()
        .and_then(|Query(q)| q.email)
        .unwrap_or_default();
    let report = engine.lookup(&email).await?;
    let body = serde_json::to_vec(&report)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "falcon-lookup",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        if self.is_validation() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response();
        }
        tracing::error!("lookup failed: {}", self);
        internal_error()
    }
}

/// Panics inside a handler surface as the same generic 500.
pub fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("handler panicked");
    internal_error()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR })),
    )
        .into_response()
}
