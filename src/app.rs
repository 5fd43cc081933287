//! Application object and bootstrap.
//!
//! An [`App`] carries display metadata and the route groups mounted on it.
//! Route groups are anything implementing [`RouteGroup`]; the app never looks
//! inside them beyond asking for their routes and API description.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use utoipa::openapi::{Info, OpenApi, Paths};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::HealthRouter;
use crate::config::Settings;
use crate::error::Result;
use crate::utils::shutdown_signal;

/// Display title of the service.
pub const APP_TITLE: &str = "AntiFakeKit API";

/// Prefix the health route group is mounted under.
pub const API_PREFIX: &str = "/api";

/// Path the generated OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// Path the interactive API docs are served from.
pub const DOCS_PATH: &str = "/docs";

/// A named collection of HTTP handlers that can be mounted under a prefix.
pub trait RouteGroup {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Routes, relative to the mount prefix.
    fn routes(&self) -> Router;

    /// API description of [`routes`](Self::routes), relative to the mount prefix.
    fn openapi(&self) -> OpenApi {
        OpenApi::new(Info::new(self.name(), env!("CARGO_PKG_VERSION")), Paths::new())
    }
}

/// Top-level application object.
pub struct App {
    title: String,
    router: Router,
    openapi: OpenApi,
}

impl App {
    /// Create an app with no routes.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        let openapi = OpenApi::new(
            Info::new(title.as_str(), env!("CARGO_PKG_VERSION")),
            Paths::new(),
        );

        Self {
            title,
            router: Router::new(),
            openapi,
        }
    }

    /// Mount a route group under `prefix`.
    ///
    /// A prefix of `/` or `""` merges the group's routes at the root.
    ///
    /// # Panics
    ///
    /// Panics if a non-empty `prefix` does not start with `/`. The check is
    /// axum's, made when the routes are nested.
    pub fn include_router<G: RouteGroup + ?Sized>(mut self, group: &G, prefix: &str) -> Self {
        let prefix = prefix.trim_end_matches('/');
        debug!(group = group.name(), prefix, "mounting route group");

        // axum refuses to nest at the root
        self.router = if prefix.is_empty() {
            self.router.merge(group.routes())
        } else {
            self.router.nest(prefix, group.routes())
        };
        self.openapi = self.openapi.nest(prefix, group.openapi());
        self
    }

    /// Display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Combined API description of every mounted group.
    pub fn openapi(&self) -> &OpenApi {
        &self.openapi
    }

    /// Finish the app into a router ready to be served.
    ///
    /// Adds the OpenAPI document at [`OPENAPI_PATH`] and Swagger UI at
    /// [`DOCS_PATH`].
    pub fn into_router(self) -> Router {
        let docs = SwaggerUi::new(DOCS_PATH).url(OPENAPI_PATH, self.openapi);

        self.router
            .merge(docs)
            .layer(TraceLayer::new_for_http())
    }
}

/// Build the service application.
pub fn bootstrap(settings: &Settings) -> App {
    info!(
        title = APP_TITLE,
        environment = settings.environment_name(),
        "bootstrapping application"
    );

    App::new(APP_TITLE).include_router(&HealthRouter, API_PREFIX)
}

/// Serve `app` on `addr` until Ctrl+C or SIGTERM.
pub async fn serve(app: App, addr: SocketAddr) -> Result<()> {
    let router = app.into_router();

    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
