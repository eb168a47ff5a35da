//! Error types for Gatekeeper.
//!
//! Every authentication failure is terminal for its request and maps to a
//! `401 Unauthorized` carrying a JSON `detail` message.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Classified authentication failure.
///
/// The `Display` text is the `detail` sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No expected credential was configured at startup.
    #[error("API key is not configured")]
    MisconfiguredCredential,

    #[error("Authentication required")]
    MissingAuthorizationHeader,

    #[error("Invalid authorization header format")]
    MalformedAuthorizationHeader,

    #[error("Invalid authentication scheme. Expected 'Bearer'")]
    UnsupportedScheme,

    #[error("Invalid token")]
    InvalidToken,
}

impl AuthError {
    /// Short machine-readable failure category, used as the `reason` log field.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MisconfiguredCredential => "misconfigured_credential",
            AuthError::MissingAuthorizationHeader => "missing_authorization_header",
            AuthError::MalformedAuthorizationHeader => "malformed_authorization_header",
            AuthError::UnsupportedScheme => "unsupported_scheme",
            AuthError::InvalidToken => "invalid_token",
        }
    }
}

/// Error response body for API clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();

        // Only a request with no credentials at all gets the challenge.
        if self == AuthError::MissingAuthorizationHeader {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}

/// Result type alias for authentication checks.
pub type AuthResult<T> = Result<T, AuthError>;
