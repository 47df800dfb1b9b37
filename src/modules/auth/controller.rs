use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;
use utoipa::ToSchema;

use yoklama_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

use super::model::{LoginRequest, LoginResponse, RegisterRequest, VerifyResponse};
use super::service::AuthService;

/// Body of every error response.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Sign in and receive a session token
///
/// In demo mode an unknown email is accepted and a teacher account is
/// created for it.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing fields or malformed email", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 429, description = "Too many requests")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_user(
    State(state): State<AppState>,
    Json(dto): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response =
        AuthService::login(&state.users, dto, &state.demo_config, &state.jwt_config).await?;
    Ok(Json(response))
}

/// Create a teacher account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = LoginResponse),
        (status = 400, description = "Missing fields, weak password or mismatch", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register_user(
    State(state): State<AppState>,
    Json(dto): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AppError> {
    let response =
        AuthService::register(&state.users, dto, &state.demo_config, &state.jwt_config).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Check a session token
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Token invalid or account removed", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn verify_session(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<VerifyResponse>, AppError> {
    Ok(Json(
        AuthService::verify(&state.users, auth_user.user_id()?).await?,
    ))
}
