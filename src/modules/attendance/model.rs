pub use yoklama_models::attendance::*;
