//! Session token creation and verification.

use anyhow::anyhow;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use yoklama_config::JwtConfig;
use yoklama_core::AppError;

use crate::claims::Claims;

/// Creates a session token for a teacher.
///
/// # Errors
///
/// Returns an internal error if encoding fails (e.g. an unusable secret).
pub fn create_session_token(
    user_id: Uuid,
    email: &str,
    name: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry.max(0) as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow!("Failed to create token: {}", e)))
}

/// Verifies a session token and returns its claims.
///
/// # Errors
///
/// Returns an unauthorized error when the signature is wrong, the token has
/// expired, or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(anyhow!("Oturum geçersiz veya süresi dolmuş")))
}
