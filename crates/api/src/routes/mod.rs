//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod dashboard;
pub mod health;
pub mod notifications;
pub mod tutorial;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(dashboard::routes())
        .merge(notifications::routes())
        .merge(tutorial::routes())
}
