//! Configuration module for Gatekeeper.
//!
//! Loads configuration from YAML files and environment variables.

use std::path::{Path, PathBuf};

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;

/// Paths reachable without credentials, in match order.
pub const DEFAULT_PUBLIC_PATHS: [&str; 6] = [
    "/",
    "/health",
    "/docs",
    "/openapi.json",
    "/redoc",
    "/favicon.ico",
];

/// Legacy environment variable holding the expected API key.
const LEGACY_API_KEY_VAR: &str = "API_KEY";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// The shared bearer secret. Unset means every gated request is rejected.
    pub api_key: Option<String>,
    /// Path prefixes exempt from authentication.
    pub public_paths: Vec<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (GATEKEEPER__SECTION__KEY, e.g. GATEKEEPER__AUTH__API_KEY)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    ///
    /// `API_KEY` is consulted last when no key was configured otherwise.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Values stay strings; a numeric-looking key must reach the gate as typed.
            .add_source(Environment::with_prefix("GATEKEEPER").separator("__"))
            .build()?;

        let mut config: Self = config.try_deserialize()?;
        if config.auth.api_key.is_none() {
            config.auth.api_key = std::env::var(LEGACY_API_KEY_VAR).ok();
        }

        Ok(config)
    }
}

/// Load variables from a dotenv file, overriding ones already set.
pub fn load_env_file(path: impl AsRef<Path>) -> Result<PathBuf, dotenvy::Error> {
    let path = path.as_ref();
    dotenvy::from_path_override(path)?;
    Ok(path.to_path_buf())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            public_paths: DEFAULT_PUBLIC_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "gatekeeper=info,tower_http=info".to_string(),
            format: LogFormat::Json,
        }
    }
}
