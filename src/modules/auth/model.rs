pub use yoklama_models::auth::*;
