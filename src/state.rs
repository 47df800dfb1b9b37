use std::sync::Arc;

use yoklama_config::{
    CorsConfig, DemoConfig, JwtConfig, RateLimitConfig, ScheduleConfig, StorageConfig,
};
use yoklama_core::{AppError, FileStore, KeyValueStore};

use crate::modules::attendance::service::AttendanceService;
use crate::modules::courses::service::CourseService;
use crate::modules::reports::service::ReportService;
use crate::modules::schedule::service::ScheduleService;
use crate::modules::settings::service::SettingsService;
use crate::modules::users::service::UserService;

/// Every configuration section the server reads at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub rate_limit: RateLimitConfig,
    pub demo: DemoConfig,
    pub schedule: ScheduleConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cors: CorsConfig::from_env(),
            rate_limit: RateLimitConfig::from_env(),
            demo: DemoConfig::from_env(),
            schedule: ScheduleConfig::from_env(),
            storage: StorageConfig::from_env(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub settings: SettingsService,
    pub users: UserService,
    pub courses: CourseService,
    pub schedules: ScheduleService,
    pub attendance: AttendanceService,
    pub reports: ReportService,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub demo_config: DemoConfig,
}

/// Builds the state on top of an arbitrary document store.
pub async fn build_app_state(
    store: Arc<dyn KeyValueStore>,
    config: AppConfig,
) -> Result<AppState, AppError> {
    let settings = SettingsService::init(store.clone(), config.storage.settings_key.clone()).await;
    let courses = CourseService::init(store, &config.storage.courses_key).await?;
    let users = UserService::with_demo_user(&config.demo)?;

    Ok(AppState {
        settings,
        users,
        courses,
        schedules: ScheduleService::new(config.schedule),
        attendance: AttendanceService::new(),
        reports: ReportService::new(config.demo.report_delay),
        jwt_config: config.jwt,
        cors_config: config.cors,
        rate_limit_config: config.rate_limit,
        demo_config: config.demo,
    })
}

/// Builds the state from the environment with a file-backed store.
pub async fn init_app_state() -> Result<AppState, AppError> {
    let config = AppConfig::from_env();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.storage.data_dir.clone()));
    build_app_state(store, config).await
}
