//! AntiFakeKit HTTP API service.
//!
//! Startup resolves [`Settings`] once, builds the [`App`] with
//! [`bootstrap`](app::bootstrap), and hands the resulting router to the
//! HTTP server.
//!
//! # Modules
//!
//! - [`config`]: Settings loading from environment and `.env`
//! - [`error`]: Unified error types
//! - [`app`]: Application object, route group mounting, bootstrap
//! - [`api`]: Route groups (health)
//! - [`utils`]: Utility functions

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod utils;

pub use app::{bootstrap, App, RouteGroup};
pub use config::Settings;
pub use error::{ApiError, Result};
