//! API route definitions.

use axum::Router;
use registra_shared::AppError;

use crate::AppState;
use crate::error::ApiError;

pub mod forms;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/formularios", forms::routes())
}

/// JSON 404 for unknown paths.
pub async fn not_found() -> ApiError {
    ApiError(AppError::NotFound("Ruta no encontrada".to_string()))
}
