use std::collections::BTreeSet;

use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{Datelike, Local};
use tracing::instrument;

use yoklama_core::AppError;
use yoklama_core::serde::hhmm;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    CreateSlotDto, GridCell, ScheduleGridResponse, ScheduleSlot, SchoolDay, TodayClass,
};

/// List the caller's schedule slots
#[utoipa::path(
    get,
    path = "/api/schedule",
    responses(
        (status = 200, description = "Slots ordered by day and start time", body = Vec<ScheduleSlot>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schedule",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_slots(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ScheduleSlot>>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(state.schedules.slots(user_id).await))
}

/// Week view of the caller's schedule
#[utoipa::path(
    get,
    path = "/api/schedule/grid",
    responses(
        (status = 200, description = "Rows per hour, one column per school day", body = ScheduleGridResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schedule",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_grid(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ScheduleGridResponse>, AppError> {
    let user_id = auth_user.user_id()?;
    let grid = state.schedules.grid(user_id).await;

    let referenced: BTreeSet<_> = grid
        .rows
        .iter()
        .flat_map(|row| row.cells.iter())
        .filter_map(|cell| match cell {
            GridCell::Start { course_id, .. } => Some(*course_id),
            _ => None,
        })
        .collect();
    let courses = referenced
        .into_iter()
        .filter_map(|id| state.courses.get(id).ok())
        .collect();

    Ok(Json(ScheduleGridResponse { grid, courses }))
}

/// Place a course in the schedule
#[utoipa::path(
    post,
    path = "/api/schedule/slots",
    request_body = CreateSlotDto,
    responses(
        (status = 201, description = "Slot saved", body = ScheduleSlot),
        (status = 400, description = "Start time or duration does not fit the day", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 409, description = "Overlaps another slot", body = ErrorResponse)
    ),
    tag = "Schedule",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn add_slot(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSlotDto>,
) -> Result<(StatusCode, Json<ScheduleSlot>), AppError> {
    let user_id = auth_user.user_id()?;
    state.courses.get(dto.course_id)?;
    let slot = state.schedules.add_slot(user_id, dto).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

#[utoipa::path(
    delete,
    path = "/api/schedule/slots/{day}/{start}",
    params(
        ("day" = SchoolDay, Path, description = "School day"),
        ("start" = String, Path, description = "Start time as HH:MM")
    ),
    responses(
        (status = 200, description = "Slot removed", body = ScheduleSlot),
        (status = 400, description = "Invalid start time", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "No slot starts there", body = ErrorResponse)
    ),
    tag = "Schedule",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn remove_slot(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((day, start)): Path<(SchoolDay, String)>,
) -> Result<Json<ScheduleSlot>, AppError> {
    let user_id = auth_user.user_id()?;
    let start = hhmm::parse(&start).map_err(|e| AppError::bad_request(anyhow!(e)))?;
    Ok(Json(state.schedules.remove_slot(user_id, day, start).await?))
}

/// Today's classes in start order
#[utoipa::path(
    get,
    path = "/api/schedule/today",
    responses(
        (status = 200, description = "Classes scheduled for today", body = Vec<TodayClass>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Schedule",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_today(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<TodayClass>>, AppError> {
    let user_id = auth_user.user_id()?;
    let today = Local::now().date_naive();
    let classes = state
        .schedules
        .classes_on(user_id, today.weekday(), &state.courses)
        .await;
    Ok(Json(classes))
}
