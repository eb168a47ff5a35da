//! HTTP API layer for Gatekeeper.
//!
//! Public status and documentation endpoints plus a protected `/api` surface.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
