//! HTTP route groups mounted by the application.

pub mod handlers;
pub mod routes;

pub use handlers::HealthResponse;
pub use routes::HealthRouter;
