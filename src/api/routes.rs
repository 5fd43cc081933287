//! HTTP API route definitions.

use axum::{routing::get, Router};
use utoipa::OpenApi;

use super::handlers::{self, health, HealthResponse};
use crate::app::RouteGroup;

#[derive(OpenApi)]
#[openapi(paths(handlers::health), components(schemas(HealthResponse)))]
struct HealthDoc;

/// The "health" route group: liveness endpoints.
#[derive(Debug, Clone, Copy, Default)]
pub struct HealthRouter;

impl RouteGroup for HealthRouter {
    fn name(&self) -> &str {
        "health"
    }

    fn routes(&self) -> Router {
        Router::new().route("/health", get(health))
    }

    fn openapi(&self) -> utoipa::openapi::OpenApi {
        HealthDoc::openapi()
    }
}
