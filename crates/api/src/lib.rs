//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes over the dashboard controller
//! - JSON error responses for [`rodabem_shared::AppError`]

pub mod error;
pub mod routes;

#[cfg(test)]
mod test_support;

use axum::Router;
use rodabem_core::dashboard::DashboardController;
use rodabem_shared::AppConfig;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Dashboard controller for the signed-in user.
    pub controller: Arc<DashboardController>,
    /// Loaded configuration.
    pub config: Arc<AppConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
