//! # Yoklama Auth
//!
//! Session token types for the Yoklama API.
//!
//! A logged-in teacher holds one opaque session token (an HS256 JWT). Its
//! presence means "logged in"; when it fails verification the client drops
//! its cached user object and returns to the login page.
//!
//! - [`claims`]: the JWT claim structure
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use yoklama_auth::{create_session_token, verify_token};
//! use yoklama_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_session_token(user_id, "ogretmen@okul.edu.tr", "Ayşe Yılmaz", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_session_token, verify_token};
