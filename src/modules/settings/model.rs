pub use yoklama_models::settings::*;
