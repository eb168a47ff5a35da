//! Gatekeeper - static bearer-token gate for HTTP services
//!
//! Every request outside a small public allow-list must carry
//! `Authorization: Bearer <key>` matching the configured secret.

use anyhow::Context;
use axum::extract::FromRef;
use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod error;
mod logging;

use crate::api::build_router;
use crate::auth::{Authenticator, ExpectedCredential, Gatekeeper, PublicPaths};
use crate::config::Config;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Per-route credential verifier.
    pub authenticator: Authenticator,
}

impl FromRef<AppState> for Authenticator {
    fn from_ref(state: &AppState) -> Self {
        state.authenticator.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // `.env` wins over the process environment; a missing file is fine.
    if let Err(e) = crate::config::load_env_file(".env") {
        eprintln!("Note: No .env file loaded ({e})");
    }

    let config = Config::load().context("Configuration error")?;

    logging::init(&config.log);

    tracing::info!("Starting Gatekeeper v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        public_paths = ?config.auth.public_paths,
        "Configuration loaded"
    );

    let credential = ExpectedCredential::new(config.auth.api_key.as_deref());
    if credential.is_configured() {
        tracing::info!("Bearer authentication enabled");
    } else {
        tracing::warn!(
            "API key is not configured - every request outside the public paths will be rejected"
        );
    }

    let state = AppState {
        authenticator: Authenticator::new(credential.clone()),
    };
    let gatekeeper = Gatekeeper::new(
        credential,
        PublicPaths::new(config.auth.public_paths.iter().cloned()),
    );

    let app = build_router(state, gatekeeper);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("API docs available at http://{}/docs/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
