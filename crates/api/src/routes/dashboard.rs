//! Dashboard routes.
//!
//! Period-scoped reads never fail with a server error: an unavailable data
//! source degrades to zeroed values with `status = "unavailable"`.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, put},
};
use chrono::Utc;
use rodabem_core::activity::ActivityEvent;
use rodabem_core::chart::ChartPoint;
use rodabem_core::dashboard::{DashboardView, LoadState, ModalState, PeriodPanel, RefreshOutcome};
use rodabem_core::metrics::PeriodStats;
use rodabem_core::period::ReportingPeriod;
use rodabem_shared::AppError;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{AppState, error::ApiError};

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/period", put(select_period))
        .route("/dashboard/stats", get(get_stats))
        .route("/dashboard/chart", get(get_chart))
        .route("/dashboard/activities", get(get_activities))
        .route("/dashboard/modals", put(update_modals))
}

// ============================================================================
// Requests
// ============================================================================

/// Optional period selector in the query string.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// `daily`, `weekly` or `monthly`; defaults to the selected period.
    pub period: Option<String>,
}

/// Body of `PUT /dashboard/period`.
#[derive(Debug, Deserialize)]
pub struct SelectPeriodRequest {
    /// Period to select.
    pub period: String,
}

/// Query parameters for the activity feed.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Maximum number of events.
    pub limit: Option<usize>,
}

/// Body of `PUT /dashboard/modals`. Absent flags stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateModalsRequest {
    /// Support ticket modal.
    pub support: Option<bool>,
    /// Notification popover.
    pub notifications: Option<bool>,
}

// ============================================================================
// Responses
// ============================================================================

/// Response for headline statistics.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Period the stats cover.
    pub period: ReportingPeriod,
    /// Statistics, zeroed when unavailable.
    pub stats: PeriodStats,
    /// Load state of `stats`.
    pub status: LoadState,
}

/// Response for the chart series.
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    /// Period of the series.
    pub period: ReportingPeriod,
    /// Chart points in chronological order.
    pub points: Vec<ChartPoint>,
    /// Load state of `points`.
    pub status: LoadState,
}

/// Response for the activity feed.
#[derive(Debug, Serialize)]
pub struct ActivitiesResponse {
    /// Events, newest first.
    pub activities: Vec<ActivityEvent>,
    /// True if the feed could not be fetched.
    pub degraded: bool,
}

fn parse_period(raw: &str) -> Result<ReportingPeriod, ApiError> {
    ReportingPeriod::parse(raw).ok_or_else(|| {
        ApiError(AppError::Validation(format!(
            "Unknown period '{raw}', expected daily, weekly or monthly"
        )))
    })
}

fn period_or_selected(state: &AppState, query: &PeriodQuery) -> Result<ReportingPeriod, ApiError> {
    query
        .period
        .as_deref()
        .map_or_else(|| Ok(state.controller.selected_period()), parse_period)
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /dashboard
async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.controller.view())
}

/// PUT /dashboard/period
async fn select_period(
    State(state): State<AppState>,
    Json(request): Json<SelectPeriodRequest>,
) -> Result<Json<PeriodPanel>, ApiError> {
    let period = parse_period(&request.period)?;
    let panel = match state.controller.select_period(period).await {
        RefreshOutcome::Applied(panel) => panel,
        RefreshOutcome::Stale => state.controller.view().panel,
    };
    info!(%period, ready = panel.is_ready(), "Dashboard period changed");
    Ok(Json(panel))
}

/// GET /dashboard/stats
async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let period = period_or_selected(&state, &query)?;
    let (stats, status) = state.controller.stats(period, Utc::now()).await;
    Ok(Json(StatsResponse {
        period,
        stats,
        status,
    }))
}

/// GET /dashboard/chart
async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ChartResponse>, ApiError> {
    let period = period_or_selected(&state, &query)?;
    let (points, status) = state.controller.chart(period, Utc::now()).await;
    Ok(Json(ChartResponse {
        period,
        points,
        status,
    }))
}

/// GET /dashboard/activities
async fn get_activities(
    State(state): State<AppState>,
    Query(query): Query<ActivityQuery>,
) -> Json<ActivitiesResponse> {
    let page = state.controller.activity(query.limit).await;
    Json(ActivitiesResponse {
        activities: page.events,
        degraded: page.degraded,
    })
}

/// PUT /dashboard/modals
async fn update_modals(
    State(state): State<AppState>,
    Json(request): Json<UpdateModalsRequest>,
) -> Json<ModalState> {
    Json(
        state
            .controller
            .update_modals(request.support, request.notifications),
    )
}
