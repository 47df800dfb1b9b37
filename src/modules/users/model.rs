pub use yoklama_models::users::*;
