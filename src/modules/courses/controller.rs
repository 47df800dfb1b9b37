use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use yoklama_core::AppError;
use yoklama_models::ids::CourseId;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;

use super::model::{Course, CourseFilterParams, PaginatedCoursesResponse, Student};

#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseFilterParams),
    responses(
        (status = 200, description = "Courses", body = PaginatedCoursesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Query(filters): Query<CourseFilterParams>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    Ok(Json(state.courses.list(&filters)))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Course>, AppError> {
    Ok(Json(state.courses.get(CourseId(id))?))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/students",
    params(("id" = i64, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course roster", body = Vec<Student>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course_students(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.courses.roster(CourseId(id))?))
}
