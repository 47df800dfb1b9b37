use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Local, NaiveDate};
use tracing::instrument;

use yoklama_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::model::{DayInfo, MonthGrid, MonthQuery};
use super::service::CalendarService;

/// Month grid built from the saved academic settings
#[utoipa::path(
    get,
    path = "/api/calendar/month",
    params(MonthQuery),
    responses(
        (status = 200, description = "Six Monday-first weeks", body = MonthGrid),
        (status = 400, description = "Invalid month", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Calendar",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_month(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthGrid>, AppError> {
    let settings = state.settings.persisted().await;
    let grid = CalendarService::month(&settings, &query, Local::now().date_naive())?;
    Ok(Json(grid))
}

#[utoipa::path(
    get,
    path = "/api/calendar/day/{date}",
    params(("date" = String, Path, description = "Date as YYYY-MM-DD")),
    responses(
        (status = 200, description = "Classification of the date", body = DayInfo),
        (status = 400, description = "Invalid date", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Calendar",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DayInfo>, AppError> {
    let settings = state.settings.persisted().await;
    Ok(Json(CalendarService::day(&settings, date)))
}
