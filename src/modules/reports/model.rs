pub use yoklama_models::reports::*;
