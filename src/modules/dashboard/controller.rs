use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Datelike, Local};
use tracing::instrument;

use yoklama_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::model::{DashboardQuery, DashboardResponse};
use super::service::DashboardService;

/// Landing page summary for the signed-in teacher
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Today's classes, statistics and upcoming dates", body = DashboardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Dashboard",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    let today = query.date.unwrap_or_else(|| Local::now().date_naive());

    let settings = state.settings.persisted().await;
    let today_classes = state
        .schedules
        .classes_on(user_id, today.weekday(), &state.courses)
        .await;
    let overview = state.attendance.overview().await;

    Ok(Json(DashboardService::build(
        &settings,
        today,
        today_classes,
        &state.courses,
        overview,
    )))
}
