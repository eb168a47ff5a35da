//! Authentication module for Gatekeeper.
//!
//! Provides two enforcement layers over one shared secret:
//! - Middleware: gates every request outside the public allow-list
//! - Verifier: per-route check for handlers that opt in explicitly

mod credential;
mod middleware;
mod verifier;

pub use credential::*;
pub use middleware::*;
pub use verifier::*;
