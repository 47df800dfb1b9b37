//! Password hashing backed by bcrypt.

use anyhow::anyhow;
use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Hashes a plaintext password with the default bcrypt cost.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

/// Hashes with an explicit cost. Tests and demo seeding use a low cost.
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::internal(anyhow!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed: &str) -> Result<bool, AppError> {
    verify(password, hashed)
        .map_err(|e| AppError::internal(anyhow!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password_with_cost("gizli123", 4).unwrap();
        assert_ne!(hashed, "gizli123");
        assert!(verify_password("gizli123", &hashed).unwrap());
        assert!(!verify_password("yanlis", &hashed).unwrap());
    }

    #[test]
    fn test_verify_against_garbage_hash_errors() {
        assert!(verify_password("x", "not-a-bcrypt-hash").is_err());
    }
}
