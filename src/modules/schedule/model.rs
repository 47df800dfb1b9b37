pub use yoklama_models::schedule::*;
