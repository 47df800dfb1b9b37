use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use yoklama_core::AppError;
use yoklama_models::ids::ReportId;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{CreateReportDto, ReportJob};

/// Queue a report
///
/// The report is generated in the background; poll the returned job until
/// its status is `completed`.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = CreateReportDto,
    responses(
        (status = 202, description = "Report queued", body = ReportJob),
        (status = 400, description = "Invalid date range", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateReportDto>,
) -> Result<(StatusCode, Json<ReportJob>), AppError> {
    let user_id = auth_user.user_id()?;
    let job = state
        .reports
        .create(
            user_id,
            dto,
            state.attendance.clone(),
            state.courses.clone(),
        )
        .await?;
    Ok((StatusCode::ACCEPTED, Json(job)))
}

/// List the caller's report jobs
#[utoipa::path(
    get,
    path = "/api/reports",
    responses(
        (status = 200, description = "Jobs, newest first", body = Vec<ReportJob>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_reports(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<Vec<ReportJob>>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(state.reports.list(user_id).await))
}

#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    params(("id" = String, Path, description = "Report job ID")),
    responses(
        (status = 200, description = "Job status and result", body = ReportJob),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse)
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<ReportId>,
) -> Result<Json<ReportJob>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(state.reports.get(user_id, id).await?))
}

/// Cancel a pending or running report, or delete a finished one
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    params(("id" = String, Path, description = "Report job ID")),
    responses(
        (status = 200, description = "Job cancelled, or removed when it had already finished", body = ReportJob),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Report not found", body = ErrorResponse)
    ),
    tag = "Reports",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_report(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<ReportId>,
) -> Result<Json<ReportJob>, AppError> {
    let user_id = auth_user.user_id()?;
    Ok(Json(state.reports.delete(user_id, id).await?))
}
