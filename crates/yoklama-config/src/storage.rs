use std::path::PathBuf;

use crate::env::string_or;

/// Where persisted documents are written and the keys they are stored under.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub settings_key: String,
    pub courses_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("storage/data"),
            settings_key: "academicSettings".to_string(),
            courses_key: "courses".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            settings_key: string_or("SETTINGS_KEY", &defaults.settings_key),
            courses_key: string_or("COURSES_KEY", &defaults.courses_key),
        }
    }
}
