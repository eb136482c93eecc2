//! HTTP intake layer with Axum routes.
//!
//! This crate provides:
//! - The `/formularios` submission routes
//! - The multipart/JSON intake extractor
//! - Error responses
//! - The email adapter for the core `Notifier` port
//! - Shutdown signal handling for the server binary

pub mod error;
pub mod intake;
pub mod notify;
pub mod routes;
pub mod shutdown;

use axum::{Router, extract::DefaultBodyLimit};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use registra_core::submission::SubmissionProcessor;

pub use error::ApiError;
pub use notify::EmailNotifier;
pub use shutdown::shutdown_signal;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Runs submissions through upload, persistence and notification.
    pub processor: Arc<SubmissionProcessor>,
    /// Largest accepted single file, in bytes.
    pub max_file_size: usize,
    /// Largest accepted request body, in bytes.
    pub max_body_bytes: usize,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
