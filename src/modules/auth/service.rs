//! Login, registration and session verification.
//!
//! Field checks happen here rather than through `validator` so the client
//! receives the same messages the login screen shows.

use anyhow::anyhow;
use tracing::{info, instrument, warn};
use validator::ValidateEmail;

use yoklama_auth::create_session_token;
use yoklama_config::{DemoConfig, JwtConfig};
use yoklama_core::AppError;
use yoklama_core::password::verify_password;
use yoklama_models::ids::UserId;

use crate::metrics::{
    track_login_failure, track_login_success, track_session_issued, track_user_registered,
};
use crate::modules::users::model::User;
use crate::modules::users::service::{NewUser, UserService};

use super::model::{LoginRequest, LoginResponse, RegisterRequest, VerifyResponse};

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub struct AuthService;

impl AuthService {
    /// Signs a teacher in.
    ///
    /// In demo mode an unknown email is provisioned as a new teacher with
    /// the submitted password.
    #[instrument(skip(users, dto, demo, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        users: &UserService,
        dto: LoginRequest,
        demo: &DemoConfig,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        tokio::time::sleep(demo.latency).await;

        let email = dto.email.trim();
        if email.is_empty() || dto.password.is_empty() {
            track_login_failure("missing_fields");
            return Err(AppError::bad_request(anyhow!("E-posta ve şifre gereklidir")));
        }
        if !email.validate_email() {
            track_login_failure("invalid_email");
            return Err(AppError::bad_request(anyhow!(
                "Geçerli bir e-posta adresi giriniz"
            )));
        }

        let user = match users.find_by_email(email).await {
            Some(user) => {
                if !verify_password(&dto.password, &user.password_hash)? {
                    warn!("Invalid password");
                    track_login_failure("invalid_credentials");
                    return Err(invalid_credentials());
                }
                user
            }
            None if demo.demo_mode => {
                let user = users
                    .create(NewUser {
                        email: email.to_string(),
                        password: dto.password,
                        first_name: "Demo".to_string(),
                        last_name: "Öğretmen".to_string(),
                        title: Some("Öğretim Görevlisi".to_string()),
                        department: None,
                    })
                    .await?;
                info!(user_id = %user.id, "Demo teacher provisioned");
                track_user_registered(true);
                user
            }
            None => {
                track_login_failure("unknown_email");
                return Err(invalid_credentials());
            }
        };

        track_login_success();
        Self::issue(&user, jwt_config)
    }

    #[instrument(skip(users, dto, demo, jwt_config), fields(email = %dto.email))]
    pub async fn register(
        users: &UserService,
        dto: RegisterRequest,
        demo: &DemoConfig,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        tokio::time::sleep(demo.latency).await;

        let first_name = dto.first_name.trim();
        let last_name = dto.last_name.trim();
        let email = dto.email.trim();
        if [first_name, last_name, email, dto.password.as_str(), dto.confirm_password.as_str()]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(AppError::bad_request(anyhow!("Tüm alanlar gereklidir")));
        }
        if !email.validate_email() {
            return Err(AppError::bad_request(anyhow!(
                "Geçerli bir e-posta adresi giriniz"
            )));
        }
        if dto.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(anyhow!(
                "Şifre en az {} karakter olmalıdır",
                MIN_PASSWORD_LENGTH
            )));
        }
        if dto.password != dto.confirm_password {
            return Err(AppError::bad_request(anyhow!("Şifreler eşleşmiyor")));
        }

        let user = users
            .create(NewUser {
                email: email.to_string(),
                password: dto.password,
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                title: None,
                department: None,
            })
            .await?;
        track_user_registered(false);
        Self::issue(&user, jwt_config)
    }

    /// Confirms that the token's account still exists.
    pub async fn verify(users: &UserService, user_id: UserId) -> Result<VerifyResponse, AppError> {
        let user = users
            .get(user_id)
            .await
            .map_err(|_| AppError::unauthorized(anyhow!("Kullanıcı bulunamadı")))?;
        Ok(VerifyResponse {
            valid: true,
            user: user.profile(),
        })
    }

    fn issue(user: &User, jwt_config: &JwtConfig) -> Result<LoginResponse, AppError> {
        let access_token =
            create_session_token(user.id.0, &user.email, &user.full_name(), jwt_config)?;
        track_session_issued();
        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user: user.profile(),
        })
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized(anyhow!("Geçersiz e-posta veya şifre"))
}
