//! Notification routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use rodabem_core::notifications::{MarkOutcome, Notification};
use rodabem_shared::AppError;
use rodabem_shared::types::NotificationId;
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Creates the notification routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", post(mark_read))
}

/// Response for the notification list.
#[derive(Debug, Serialize)]
pub struct NotificationsResponse {
    /// Notifications, most recent first.
    pub notifications: Vec<Notification>,
    /// Unread notifications.
    pub unread_count: usize,
}

/// Response for marking a notification as read.
#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    /// Notification ID.
    pub id: NotificationId,
    /// `marked` or `already_read`.
    pub outcome: MarkOutcome,
    /// Unread notifications afterwards.
    pub unread_count: usize,
}

/// GET /notifications
async fn list_notifications(State(state): State<AppState>) -> Json<NotificationsResponse> {
    let view = state.controller.view();
    Json(NotificationsResponse {
        notifications: view.notifications,
        unread_count: view.unread_count,
    })
}

/// POST /notifications/{id}/read
async fn mark_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let id: NotificationId = id
        .parse()
        .map_err(|_| ApiError(AppError::Validation(format!("Invalid notification id '{id}'"))))?;

    let outcome = state.controller.mark_notification_read(id).await?;
    Ok(Json(MarkReadResponse {
        id,
        outcome,
        unread_count: state.controller.view().unread_count,
    }))
}
