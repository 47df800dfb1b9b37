//! Teacher accounts.
//!
//! Accounts live in memory for the lifetime of the process. The configured
//! demo account is created at startup.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use yoklama_config::DemoConfig;
use yoklama_core::AppError;
use yoklama_core::password::{hash_password_with_cost, verify_password};
use yoklama_models::ids::UserId;

use super::model::{ChangePasswordDto, UpdateProfileDto, User};

/// Fields needed to open an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    bcrypt_cost: u32,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserService {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            bcrypt_cost,
        }
    }

    /// A service holding the configured demo teacher.
    pub fn with_demo_user(demo: &DemoConfig) -> Result<Self, AppError> {
        let user = User {
            id: UserId::new(),
            email: normalize_email(&demo.demo_email),
            password_hash: hash_password_with_cost(&demo.demo_password, demo.bcrypt_cost)?,
            first_name: "Ayşe".to_string(),
            last_name: "Yılmaz".to_string(),
            title: Some("Dr. Öğr. Üyesi".to_string()),
            department: Some("Matematik Bölümü".to_string()),
            phone: None,
            created_at: Utc::now(),
        };
        Ok(Self {
            users: Arc::new(RwLock::new(HashMap::from([(user.id, user)]))),
            bcrypt_cost: demo.bcrypt_cost,
        })
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub async fn get(&self, id: UserId) -> Result<User, AppError> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(anyhow!("Kullanıcı bulunamadı")))
    }

    /// Opens an account; the email must not be registered yet.
    #[instrument(skip(self, new_user), fields(email = %new_user.email))]
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let password_hash = hash_password_with_cost(&new_user.password, self.bcrypt_cost)?;
        let email = normalize_email(&new_user.email);

        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(AppError::conflict(anyhow!("Bu e-posta adresi zaten kayıtlı")));
        }

        let user = User {
            id: UserId::new(),
            email,
            password_hash,
            first_name: new_user.first_name.trim().to_string(),
            last_name: new_user.last_name.trim().to_string(),
            title: new_user.title,
            department: new_user.department,
            phone: None,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(&self, id: UserId, dto: UpdateProfileDto) -> Result<User, AppError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(anyhow!("Kullanıcı bulunamadı")))?;

        if let Some(first_name) = dto.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = dto.last_name {
            user.last_name = last_name.trim().to_string();
        }
        user.title = dto.title;
        user.department = dto.department;
        user.phone = dto.phone;

        Ok(user.clone())
    }

    #[instrument(skip(self, dto))]
    pub async fn change_password(&self, id: UserId, dto: ChangePasswordDto) -> Result<(), AppError> {
        if dto.new_password != dto.confirm_password {
            return Err(AppError::bad_request(anyhow!("Şifreler eşleşmiyor")));
        }

        let current_hash = self.get(id).await?.password_hash;
        if !verify_password(&dto.current_password, &current_hash)? {
            return Err(AppError::bad_request(anyhow!("Mevcut şifre hatalı")));
        }
        let new_hash = hash_password_with_cost(&dto.new_password, self.bcrypt_cost)?;

        let mut users = self.users.write().await;
        let user = users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(anyhow!("Kullanıcı bulunamadı")))?;
        user.password_hash = new_hash;
        info!(user_id = %id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> DemoConfig {
        DemoConfig {
            bcrypt_cost: 4,
            ..DemoConfig::default()
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "secret1".to_string(),
            first_name: "Mehmet".to_string(),
            last_name: "Kaya".to_string(),
            title: None,
            department: None,
        }
    }

    #[tokio::test]
    async fn test_demo_user_exists() {
        let service = UserService::with_demo_user(&demo()).unwrap();
        let user = service.find_by_email(" Ogretmen@Okul.edu.tr ").await.unwrap();
        assert_eq!(user.full_name(), "Ayşe Yılmaz");
        assert!(verify_password("demo123", &user.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let service = UserService::new(4);
        service.create(new_user("mehmet@okul.edu.tr")).await.unwrap();
        let err = service
            .create(new_user("MEHMET@okul.edu.tr"))
            .await
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 409);
        assert_eq!(err.message(), "Bu e-posta adresi zaten kayıtlı");
    }

    #[tokio::test]
    async fn test_update_profile_clears_optional_fields() {
        let service = UserService::with_demo_user(&demo()).unwrap();
        let id = service.find_by_email("ogretmen@okul.edu.tr").await.unwrap().id;

        let updated = service
            .update_profile(
                id,
                UpdateProfileDto {
                    first_name: Some("Ayşe Nur".into()),
                    phone: Some("0555 000 00 00".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Ayşe Nur");
        assert_eq!(updated.last_name, "Yılmaz");
        assert_eq!(updated.title, None);
        assert_eq!(updated.phone.as_deref(), Some("0555 000 00 00"));
    }

    #[tokio::test]
    async fn test_change_password() {
        let service = UserService::with_demo_user(&demo()).unwrap();
        let id = service.find_by_email("ogretmen@okul.edu.tr").await.unwrap().id;

        let mismatch = service
            .change_password(
                id,
                ChangePasswordDto {
                    current_password: "demo123".into(),
                    new_password: "yeni123".into(),
                    confirm_password: "yeni124".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(mismatch.message(), "Şifreler eşleşmiyor");

        let wrong = service
            .change_password(
                id,
                ChangePasswordDto {
                    current_password: "yanlis".into(),
                    new_password: "yeni123".into(),
                    confirm_password: "yeni123".into(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(wrong.status.as_u16(), 400);

        service
            .change_password(
                id,
                ChangePasswordDto {
                    current_password: "demo123".into(),
                    new_password: "yeni123".into(),
                    confirm_password: "yeni123".into(),
                },
            )
            .await
            .unwrap();
        let user = service.get(id).await.unwrap();
        assert!(verify_password("yeni123", &user.password_hash).unwrap());
    }
}
