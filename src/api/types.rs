//! API request and response types.

use serde::Serialize;
use utoipa::ToSchema;

// ==================== Public ====================

/// Service banner returned from the root path.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Where the interactive API docs live.
    pub docs: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Whether an API key is configured. Without one every gated request fails.
    pub auth_configured: bool,
    /// Timestamp.
    pub timestamp: String,
}

// ==================== Protected ====================

/// Result of a per-route credential check.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub scheme: String,
}

/// Sample protected payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct DataResponse {
    pub items: Vec<DataItem>,
    /// Timestamp.
    pub generated_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DataItem {
    pub id: u32,
    pub name: String,
}
