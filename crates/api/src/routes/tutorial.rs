//! Onboarding tutorial routes.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use rodabem_core::tutorial::{TutorialSnapshot, TutorialStep};
use rodabem_shared::AppError;
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Creates the tutorial routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tutorial", get(get_tutorial))
        .route("/tutorial/arrive", post(arrive))
        .route("/tutorial/reset", post(reset))
}

/// Body of `POST /tutorial/arrive`: either the route the user navigated to
/// or a step name.
#[derive(Debug, Deserialize)]
pub struct ArriveRequest {
    /// Console route, e.g. `/destinos`.
    pub route: Option<String>,
    /// Step name, e.g. `destinations`.
    pub step: Option<String>,
}

/// GET /tutorial
async fn get_tutorial(State(state): State<AppState>) -> Json<TutorialSnapshot> {
    Json(state.controller.tutorial().snapshot())
}

/// POST /tutorial/arrive
async fn arrive(
    State(state): State<AppState>,
    Json(request): Json<ArriveRequest>,
) -> Result<Json<TutorialSnapshot>, ApiError> {
    let route = match (request.route, request.step) {
        (Some(route), _) => route,
        (None, Some(step)) => step.parse::<TutorialStep>()?.route().to_string(),
        (None, None) => {
            return Err(ApiError(AppError::Validation(
                "Either 'route' or 'step' is required".into(),
            )));
        }
    };

    let outcome = state.controller.navigate(&route).await;
    debug!(route = %route, ?outcome, "Tutorial arrival");
    Ok(Json(state.controller.tutorial().snapshot()))
}

/// POST /tutorial/reset
async fn reset(State(state): State<AppState>) -> Json<TutorialSnapshot> {
    state.controller.tutorial().reset().await;
    Json(state.controller.tutorial().snapshot())
}
