use axum::{Json, extract::State};
use tracing::instrument;

use yoklama_core::AppError;
use yoklama_models::auth::MessageResponse;

use crate::middleware::auth::AuthUser;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::model::{ChangePasswordDto, UpdateProfileDto, UserProfile};

/// Get the signed-in teacher's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Profile", body = UserProfile),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserProfile>, AppError> {
    let user = state.users.get(auth_user.user_id()?).await?;
    Ok(Json(user.profile()))
}

/// Update the signed-in teacher's profile
#[utoipa::path(
    put,
    path = "/api/users/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated profile", body = UserProfile),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileDto>,
) -> Result<Json<UserProfile>, AppError> {
    let user = state
        .users
        .update_profile(auth_user.user_id()?, dto)
        .await?;
    Ok(Json(user.profile()))
}

#[utoipa::path(
    put,
    path = "/api/users/me/password",
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Passwords do not match or current password is wrong", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<ChangePasswordDto>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .users
        .change_password(auth_user.user_id()?, dto)
        .await?;
    Ok(Json(MessageResponse::new("Şifreniz güncellendi")))
}
