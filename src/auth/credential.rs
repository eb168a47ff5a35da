//! Startup-loaded credential material and per-request header parsing.

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap};

use crate::error::{AuthError, AuthResult};

/// The shared bearer secret every gated request must present.
///
/// Absent when no key was configured; an absent credential matches nothing.
#[derive(Clone, Default)]
pub struct ExpectedCredential(Option<Arc<str>>);

impl ExpectedCredential {
    /// Build from a configured value. Empty strings are treated as unset.
    pub fn new(api_key: Option<&str>) -> Self {
        Self(api_key.filter(|key| !key.is_empty()).map(Arc::from))
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Exact comparison against a presented token.
    pub fn matches(&self, presented: &str) -> bool {
        match self.as_deref() {
            Some(expected) => constant_time_eq(expected.as_bytes(), presented.as_bytes()),
            None => false,
        }
    }
}

// Never print the secret, even in debug output.
impl std::fmt::Debug for ExpectedCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_configured() {
            "<configured>"
        } else {
            "<unset>"
        };
        f.debug_tuple("ExpectedCredential").field(&state).finish()
    }
}

/// Ordered allow-list of path prefixes that bypass authentication.
#[derive(Debug, Clone)]
pub struct PublicPaths(Arc<[String]>);

impl PublicPaths {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(paths.into_iter().map(Into::into).collect())
    }

    /// Whether `path` is exempt from authentication.
    ///
    /// Entries match as prefixes, so `/docs` also covers
    /// `/docs/oauth2-redirect`. The root entry `/` only matches the root
    /// itself, otherwise it would exempt every path.
    pub fn is_public(&self, path: &str) -> bool {
        self.0.iter().any(|entry| {
            if entry == "/" {
                path == "/"
            } else {
                path.starts_with(entry.as_str())
            }
        })
    }
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PUBLIC_PATHS)
    }
}

/// Credentials presented in an `Authorization: <scheme> <token>` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerCredentials {
    pub scheme: String,
    pub token: String,
}

impl BearerCredentials {
    pub fn new(scheme: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            token: token.into(),
        }
    }

    /// Split a header value into exactly two whitespace-separated tokens.
    ///
    /// Leading, trailing and repeated whitespace is ignored. Any token count
    /// other than two is malformed.
    pub fn from_parts_exact(value: &str) -> AuthResult<Self> {
        let mut parts = value.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(token), None) => Ok(Self::new(scheme, token)),
            _ => Err(AuthError::MalformedAuthorizationHeader),
        }
    }

    /// Split a header value at its first whitespace run into scheme and
    /// parameter. The parameter keeps any inner whitespace.
    pub fn from_scheme_param(value: &str) -> AuthResult<Self> {
        let (scheme, token) = value
            .trim()
            .split_once(char::is_whitespace)
            .ok_or(AuthError::MalformedAuthorizationHeader)?;
        let token = token.trim_start();
        if scheme.is_empty() || token.is_empty() {
            return Err(AuthError::MalformedAuthorizationHeader);
        }
        Ok(Self::new(scheme, token))
    }
}

// Tokens are secrets; only the scheme is printable.
impl std::fmt::Debug for BearerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerCredentials")
            .field("scheme", &self.scheme)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Read the `Authorization` header as text.
///
/// A missing header and an unreadable one are reported separately.
pub fn authorization_header(headers: &HeaderMap) -> AuthResult<&str> {
    headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthorizationHeader)?
        .to_str()
        .map_err(|_| AuthError::MalformedAuthorizationHeader)
}

/// Constant-time byte comparison.
///
/// Iterates over the full length of `expected` regardless of `provided`, so
/// response timing does not reveal how much of the key matched.
pub fn constant_time_eq(expected: &[u8], provided: &[u8]) -> bool {
    let mut diff = u8::from(expected.len() != provided.len());
    for (i, byte) in expected.iter().enumerate() {
        let other = provided.get(i).copied().unwrap_or(0xff);
        diff |= byte ^ other;
    }
    diff == 0
}
