pub use yoklama_models::courses::*;
