//! Route definitions for the API.

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::{require_bearer, Gatekeeper};
use crate::AppState;

/// Security scheme modifier for OpenAPI.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::root,
        handlers::health_check,
        handlers::get_session,
        handlers::get_data,
    ),
    components(schemas(
        crate::api::types::RootResponse,
        crate::api::types::HealthResponse,
        crate::api::types::SessionResponse,
        crate::api::types::DataResponse,
        crate::api::types::DataItem,
        crate::error::ErrorResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health and status endpoints"),
        (name = "protected", description = "Endpoints requiring a bearer token")
    ),
    info(
        title = "Gatekeeper API",
        version = "0.1.0",
        description = "Static bearer-token gate - public paths pass, everything else needs `Authorization: Bearer <key>`",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Build the API router behind the global bearer gate.
///
/// The gate wraps every route, including the docs and the fallback, and
/// lets the configured public paths through untouched.
pub fn build_router(state: AppState, gatekeeper: Gatekeeper) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/api/session", get(handlers::get_session))
        .route("/api/data", get(handlers::get_data));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .merge(api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(gatekeeper, require_bearer))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::auth::{Authenticator, ExpectedCredential, PublicPaths};

    fn app(key: Option<&str>) -> Router {
        let credential = ExpectedCredential::new(key);
        let state = AppState {
            authenticator: Authenticator::new(credential.clone()),
        };
        build_router(state, Gatekeeper::new(credential, PublicPaths::default()))
    }

    async fn get_json(app: Router, uri: &str, auth: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_public_endpoints_without_credentials() {
        let (status, body) = get_json(app(Some("secret123")), "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["auth_configured"], true);

        let (status, body) = get_json(app(Some("secret123")), "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "gatekeeper");

        let (status, body) = get_json(app(None), "/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/data"].is_object());
        assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
    }

    #[tokio::test]
    async fn test_health_reports_missing_key() {
        let (status, body) = get_json(app(None), "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["auth_configured"], false);
    }

    #[tokio::test]
    async fn test_protected_endpoints_require_token() {
        for uri in ["/api/data", "/api/session"] {
            let (status, body) = get_json(app(Some("secret123")), uri, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["detail"], "Authentication required");

            let (status, body) =
                get_json(app(Some("secret123")), uri, Some("Bearer wrong")).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["detail"], "Invalid token");
        }
    }

    #[tokio::test]
    async fn test_protected_endpoints_with_token() {
        let (status, body) =
            get_json(app(Some("secret123")), "/api/data", Some("Bearer secret123")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 3);

        let (status, body) =
            get_json(app(Some("secret123")), "/api/session", Some("Bearer secret123")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["authenticated"], true);
    }

    #[tokio::test]
    async fn test_route_verifier_is_stricter_about_scheme() {
        // The gate accepts any scheme casing; the per-route verifier does not.
        let (status, _) =
            get_json(app(Some("secret123")), "/api/data", Some("bearer secret123")).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            get_json(app(Some("secret123")), "/api/session", Some("bearer secret123")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body["detail"],
            "Invalid authentication scheme. Expected 'Bearer'"
        );
    }

    #[tokio::test]
    async fn test_unconfigured_key_fails_closed() {
        let (status, body) = get_json(app(None), "/api/data", Some("Bearer secret123")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Invalid token");
    }
}
