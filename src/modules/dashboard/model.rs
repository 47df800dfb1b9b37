pub use yoklama_models::dashboard::*;
