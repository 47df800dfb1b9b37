//! Teacher accounts and profile DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use yoklama_core::serde::deserialize_optional_string;

use crate::ids::UserId;

/// A teacher account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            title: self.title.clone(),
            department: self.department.clone(),
            phone: self.phone.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; absent fields are left unchanged and empty
/// optional strings clear the field.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 50, message = "Ad 1-50 karakter olmalıdır"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Soyad 1-50 karakter olmalıdır"))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub department: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    #[validate(length(min = 1, message = "Mevcut şifre gereklidir"))]
    pub current_password: String,
    #[validate(length(min = 6, message = "Şifre en az 6 karakter olmalıdır"))]
    pub new_password: String,
    pub confirm_password: String,
}
