use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use yoklama_auth::verify_token;
use yoklama_core::AppError;
use yoklama_models::Claims;
use yoklama_models::ids::UserId;

use crate::state::AppState;

/// Extractor that validates the session token and provides its claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Get the user ID from the token subject
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.0
            .user_id()
            .map(UserId::from)
            .ok_or_else(|| AppError::unauthorized(anyhow!("Oturum geçersiz veya süresi dolmuş")))
    }

    pub fn email(&self) -> &str {
        &self.0.email
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        AppError::unauthorized(anyhow!("Oturum açmanız gerekiyor"))
                    } else {
                        AppError::unauthorized(anyhow!("Geçersiz yetkilendirme başlığı"))
                    }
                })?;

        let claims = verify_token(bearer.token(), &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn claims(sub: String) -> Claims {
        Claims {
            sub,
            email: "ogretmen@okul.edu.tr".to_string(),
            name: "Ayşe Yılmaz".to_string(),
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_user_id_parses_subject() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser(claims(id.to_string()));
        assert_eq!(auth_user.user_id().unwrap(), UserId(id));
        assert_eq!(auth_user.email(), "ogretmen@okul.edu.tr");
    }

    #[test]
    fn test_invalid_subject_is_unauthorized() {
        let auth_user = AuthUser(claims("not-a-uuid".to_string()));
        let err = auth_user.user_id().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
