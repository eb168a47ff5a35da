//! HTTP request handlers.

use axum::{extract::State, Json};

use crate::api::types::*;
use crate::auth::{VerifiedToken, BEARER_SCHEME};
use crate::AppState;

/// Service banner.
///
/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service information", body = RootResponse)
    ),
    tag = "health"
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/docs".to_string(),
    })
}

/// Health check endpoint.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        auth_configured: state.authenticator.is_configured(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Confirm the presented bearer token.
///
/// Checked per route by the verifier, on top of the global gate.
///
/// GET /api/session
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Token accepted", body = SessionResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "protected"
)]
pub async fn get_session(VerifiedToken(_token): VerifiedToken) -> Json<SessionResponse> {
    tracing::debug!("Session verified");

    Json(SessionResponse {
        authenticated: true,
        scheme: BEARER_SCHEME.to_string(),
    })
}

/// Sample protected data, gated by the global middleware only.
///
/// GET /api/data
#[utoipa::path(
    get,
    path = "/api/data",
    responses(
        (status = 200, description = "Protected payload", body = DataResponse),
        (status = 401, description = "Not authenticated", body = crate::error::ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "protected"
)]
pub async fn get_data() -> Json<DataResponse> {
    let items = ["alpha", "beta", "gamma"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| DataItem {
            id,
            name: name.to_string(),
        })
        .collect();

    Json(DataResponse {
        items,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}
