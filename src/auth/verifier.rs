//! Per-route credential verification.
//!
//! Handlers opt in by taking a [`VerifiedToken`] argument. The global
//! middleware is the broader alternative.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::auth::credential::{authorization_header, BearerCredentials, ExpectedCredential};
use crate::error::{AuthError, AuthResult};

/// Scheme accepted by [`Authenticator::verify`], compared case-sensitively.
pub const BEARER_SCHEME: &str = "Bearer";

/// Verifies presented bearer credentials against the configured secret.
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    credential: ExpectedCredential,
}

impl Authenticator {
    pub fn new(credential: ExpectedCredential) -> Self {
        Self { credential }
    }

    pub fn is_configured(&self) -> bool {
        self.credential.is_configured()
    }

    /// Check credentials and return the verified token.
    pub fn verify(&self, credentials: &BearerCredentials) -> AuthResult<String> {
        if !self.credential.is_configured() {
            tracing::warn!(
                reason = AuthError::MisconfiguredCredential.reason(),
                "API key is not configured, rejecting request"
            );
            return Err(AuthError::MisconfiguredCredential);
        }

        if credentials.scheme != BEARER_SCHEME {
            tracing::warn!(
                reason = AuthError::UnsupportedScheme.reason(),
                scheme = %credentials.scheme,
                "Invalid authentication scheme"
            );
            return Err(AuthError::UnsupportedScheme);
        }

        if !self.credential.matches(&credentials.token) {
            tracing::warn!(
                reason = AuthError::InvalidToken.reason(),
                "Invalid token provided"
            );
            return Err(AuthError::InvalidToken);
        }

        Ok(credentials.token.clone())
    }
}

/// A token that passed [`Authenticator::verify`].
///
/// Extracting it rejects the request with the matching [`AuthError`].
#[derive(Clone)]
pub struct VerifiedToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for VerifiedToken
where
    Authenticator: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let authenticator = Authenticator::from_ref(state);

        let credentials = authorization_header(&parts.headers)
            .and_then(BearerCredentials::from_scheme_param)
            .inspect_err(|e| {
                tracing::warn!(
                    path = %parts.uri.path(),
                    reason = e.reason(),
                    "Rejected request without usable credentials"
                );
            })?;

        authenticator.verify(&credentials).map(VerifiedToken)
    }
}
