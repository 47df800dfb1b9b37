//! # Yoklama Config
//!
//! Configuration types for the Yoklama API, each loaded from environment
//! variables with sensible defaults:
//!
//! - [`jwt`]: session token signing
//! - [`cors`]: allowed front-end origins
//! - [`rate_limit`]: throttling of the auth endpoints
//! - [`storage`]: where persisted documents live and under which keys
//! - [`demo`]: demo-mode auth and simulated latencies
//! - [`schedule`]: the hours covered by the weekly timetable
//! - [`server`]: bind address
//!
//! # Example
//!
//! ```ignore
//! use yoklama_config::{JwtConfig, StorageConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let storage_config = StorageConfig::from_env();
//! ```

pub mod cors;
pub mod demo;
pub mod jwt;
pub mod rate_limit;
pub mod schedule;
pub mod server;
pub mod storage;

mod env;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use demo::DemoConfig;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use schedule::ScheduleConfig;
pub use server::ServerConfig;
pub use storage::StorageConfig;
