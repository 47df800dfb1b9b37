use anyhow::anyhow;
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{Local, NaiveDate};
use tracing::instrument;

use yoklama_core::AppError;
use yoklama_models::ids::CourseId;

use crate::metrics::track_attendance_recorded;
use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{AttendanceHistory, AttendanceSession, RecordAttendanceDto};

/// Record attendance for a course on a date
#[utoipa::path(
    put,
    path = "/api/courses/{id}/attendance/{date}",
    params(
        ("id" = i64, Path, description = "Course ID"),
        ("date" = String, Path, description = "Date as YYYY-MM-DD")
    ),
    request_body = RecordAttendanceDto,
    responses(
        (status = 200, description = "Session recorded", body = AttendanceSession),
        (status = 400, description = "Holiday, future date, or student not on the roster", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn record_attendance(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, date)): Path<(i64, NaiveDate)>,
    ValidatedJson(dto): ValidatedJson<RecordAttendanceDto>,
) -> Result<Json<AttendanceSession>, AppError> {
    let user_id = auth_user.user_id()?;
    let course = state
        .courses
        .find(CourseId(id))
        .ok_or_else(|| AppError::not_found(anyhow!("Ders bulunamadı: {}", id)))?;
    let settings = state.settings.persisted().await;

    let session = state
        .attendance
        .record(
            course,
            date,
            dto,
            user_id,
            &settings,
            Local::now().date_naive(),
        )
        .await?;
    track_attendance_recorded(&course.course.code);

    Ok(Json(session))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/attendance/{date}",
    params(
        ("id" = i64, Path, description = "Course ID"),
        ("date" = String, Path, description = "Date as YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Recorded session", body = AttendanceSession),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course or session not found", body = ErrorResponse)
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path((id, date)): Path<(i64, NaiveDate)>,
) -> Result<Json<AttendanceSession>, AppError> {
    let course_id = CourseId(id);
    state.courses.get(course_id)?;
    Ok(Json(state.attendance.get(course_id, date).await?))
}

/// Per-date attendance counts for a course
#[utoipa::path(
    get,
    path = "/api/courses/{id}/attendance",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Attendance history", body = AttendanceHistory),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Attendance",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_attendance_history(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<AttendanceHistory>, AppError> {
    let course_id = CourseId(id);
    state.courses.get(course_id)?;
    Ok(Json(state.attendance.history(course_id).await))
}
