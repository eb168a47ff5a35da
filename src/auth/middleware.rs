//! Global authentication middleware for axum.

use axum::{
    body::Body,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::credential::{
    authorization_header, BearerCredentials, ExpectedCredential, PublicPaths,
};
use crate::error::{AuthError, AuthResult};

/// Shared state for [`require_bearer`]: the secret plus the public allow-list.
///
/// Both are immutable after startup and cheap to clone per request.
#[derive(Debug, Clone, Default)]
pub struct Gatekeeper {
    credential: ExpectedCredential,
    public_paths: PublicPaths,
}

impl Gatekeeper {
    pub fn new(credential: ExpectedCredential, public_paths: PublicPaths) -> Self {
        Self {
            credential,
            public_paths,
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.is_public(path)
    }

    /// Decide whether a request for `path` with `headers` may proceed.
    ///
    /// Public paths always pass. Every rejection is logged with the path
    /// and the failure reason.
    pub fn authorize(&self, path: &str, headers: &HeaderMap) -> AuthResult<()> {
        if self.is_public(path) {
            return Ok(());
        }

        let credentials = authorization_header(headers)
            .and_then(BearerCredentials::from_parts_exact)
            .inspect_err(|e| {
                tracing::warn!(path = %path, reason = e.reason(), "Unauthorized access attempt");
            })?;

        if !credentials.scheme.eq_ignore_ascii_case("bearer") {
            tracing::warn!(
                path = %path,
                reason = AuthError::UnsupportedScheme.reason(),
                scheme = %credentials.scheme,
                "Invalid authentication scheme"
            );
            return Err(AuthError::UnsupportedScheme);
        }

        if !self.credential.matches(&credentials.token) {
            tracing::warn!(
                path = %path,
                reason = AuthError::InvalidToken.reason(),
                key_configured = self.credential.is_configured(),
                "Invalid token provided"
            );
            return Err(AuthError::InvalidToken);
        }

        Ok(())
    }
}

/// Reject requests to non-public paths that lack a valid
/// `Authorization: Bearer <key>` header.
///
/// Allowed requests are forwarded untouched and the downstream response is
/// returned as is.
pub async fn require_bearer(
    State(gatekeeper): State<Gatekeeper>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    gatekeeper.authorize(request.uri().path(), request.headers())?;

    Ok(next.run(request).await)
}
