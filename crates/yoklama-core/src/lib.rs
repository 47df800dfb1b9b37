//! # Yoklama Core
//!
//! Core types, errors, and storage for the Yoklama API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Pagination utilities for list endpoints
//! - [`password`]: Password hashing and verification
//! - [`serde`]: Custom serde helpers (e.g. `HH:MM` times)
//! - [`storage`]: Key-value document store used for persisted settings
//!
//! # Example
//!
//! ```ignore
//! use yoklama_core::{AppError, FileStore, KeyValueStore};
//!
//! let store = FileStore::new("./storage/data");
//! store.put("academicSettings", &json).await?;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod serde;
pub mod storage;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{PaginationMeta, PaginationParams, paginate};
pub use password::{hash_password, verify_password};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
