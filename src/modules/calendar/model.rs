pub use yoklama_models::calendar::*;
