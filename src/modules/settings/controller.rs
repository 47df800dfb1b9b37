use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use yoklama_core::AppError;
use yoklama_models::ids::{ExamPeriodId, HolidayId};

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{
    AcademicSettings, CreateExamPeriodDto, CreateHolidayDto, ExamPeriod, Holiday,
    SettingsResponse, UpdateSettingsDto,
};

/// Get the working copy of the academic settings
#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Current settings", body = SettingsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<SettingsResponse>, AppError> {
    Ok(Json(state.settings.current().await))
}

/// Update the academic year and semester dates
#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsDto,
    responses(
        (status = 200, description = "Working copy updated", body = AcademicSettings),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_settings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateSettingsDto>,
) -> Result<Json<AcademicSettings>, AppError> {
    Ok(Json(state.settings.update_general(dto).await))
}

/// Persist the working copy
#[utoipa::path(
    post,
    path = "/api/settings/save",
    responses(
        (status = 200, description = "Settings saved", body = AcademicSettings),
        (status = 400, description = "Semester dates are inverted", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn save_settings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<AcademicSettings>, AppError> {
    Ok(Json(state.settings.save().await?))
}

/// Discard unsaved edits and reload the stored settings
#[utoipa::path(
    post,
    path = "/api/settings/load",
    responses(
        (status = 200, description = "Settings reloaded", body = AcademicSettings),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Stored settings are unreadable", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn load_settings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<AcademicSettings>, AppError> {
    Ok(Json(state.settings.load().await?))
}

/// Restore the default academic calendar
#[utoipa::path(
    post,
    path = "/api/settings/reset",
    responses(
        (status = 200, description = "Defaults restored", body = AcademicSettings),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn reset_settings(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> Result<Json<AcademicSettings>, AppError> {
    Ok(Json(state.settings.reset().await?))
}

/// Add a holiday to the working copy
#[utoipa::path(
    post,
    path = "/api/settings/holidays",
    request_body = CreateHolidayDto,
    responses(
        (status = 201, description = "Holiday added", body = Holiday),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn add_holiday(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateHolidayDto>,
) -> Result<(StatusCode, Json<Holiday>), AppError> {
    let holiday = state.settings.add_holiday(dto).await;
    Ok((StatusCode::CREATED, Json(holiday)))
}

#[utoipa::path(
    delete,
    path = "/api/settings/holidays/{id}",
    params(("id" = i64, Path, description = "Holiday ID")),
    responses(
        (status = 200, description = "Holiday removed", body = Holiday),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Holiday not found", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn remove_holiday(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Holiday>, AppError> {
    Ok(Json(state.settings.remove_holiday(HolidayId(id)).await?))
}

/// Add an exam period to the working copy
#[utoipa::path(
    post,
    path = "/api/settings/exam-periods",
    request_body = CreateExamPeriodDto,
    responses(
        (status = 201, description = "Exam period added", body = ExamPeriod),
        (status = 400, description = "Start date is not before end date", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn add_exam_period(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateExamPeriodDto>,
) -> Result<(StatusCode, Json<ExamPeriod>), AppError> {
    let period = state.settings.add_exam_period(dto).await?;
    Ok((StatusCode::CREATED, Json(period)))
}

#[utoipa::path(
    delete,
    path = "/api/settings/exam-periods/{id}",
    params(("id" = i64, Path, description = "Exam period ID")),
    responses(
        (status = 200, description = "Exam period removed", body = ExamPeriod),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Exam period not found", body = ErrorResponse)
    ),
    tag = "Settings",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn remove_exam_period(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ExamPeriod>, AppError> {
    Ok(Json(
        state
            .settings
            .remove_exam_period(ExamPeriodId(id))
            .await?,
    ))
}
