//! Authentication DTOs.
//!
//! Login and registration fields are checked by the auth service so that the
//! client receives the exact messages the login screen shows, rather than
//! generic validation output.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::users::UserProfile;

pub use yoklama_auth::Claims;

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ogretmen@okul.edu.tr")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "demo123")]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Successful login or registration.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
