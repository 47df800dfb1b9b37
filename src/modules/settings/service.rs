use std::sync::Arc;

use anyhow::anyhow;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use yoklama_core::storage::JsonStoreExt;
use yoklama_core::{AppError, KeyValueStore, StorageError};

use crate::metrics::track_settings_saved;

use super::model::{
    AcademicSettings, CreateExamPeriodDto, CreateHolidayDto, ExamPeriod, Holiday,
    SettingsResponse, UpdateSettingsDto,
};
use yoklama_models::ids::{ExamPeriodId, HolidayId};

#[derive(Debug, Default)]
struct SettingsState {
    /// Edited by the settings screen, persisted on save
    working: AcademicSettings,
    /// Mirror of the stored document (defaults when nothing is stored)
    persisted: AcademicSettings,
}

/// Owns the academic settings document.
///
/// Edits go to a working copy; only [`SettingsService::save`] writes to the
/// store. Calendar views read the persisted copy.
#[derive(Clone)]
pub struct SettingsService {
    store: Arc<dyn KeyValueStore>,
    key: String,
    state: Arc<RwLock<SettingsState>>,
}

impl SettingsService {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            state: Arc::new(RwLock::new(SettingsState::default())),
        }
    }

    /// Creates the service and loads the stored document. An unreadable
    /// document is logged and left untouched; the service starts from
    /// defaults.
    pub async fn init(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let service = Self::new(store, key);
        if let Err(e) = service.load().await {
            error!(key = %service.key, error = %e.message(), "Starting with default settings");
        }
        service
    }

    async fn read_stored(&self) -> Result<Option<AcademicSettings>, AppError> {
        match self.store.get_json::<AcademicSettings>(&self.key).await {
            Ok(settings) => Ok(settings),
            Err(e @ StorageError::Corrupt { .. }) => {
                error!(error = %e, "Stored settings are corrupt");
                Err(AppError::internal(anyhow!("Kayıtlı ayarlar okunamadı")))
            }
            Err(e) => Err(AppError::internal(e)),
        }
    }

    /// Replaces the working copy with the stored document, or defaults when
    /// nothing is stored.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<AcademicSettings, AppError> {
        let stored = self.read_stored().await?;
        let settings = stored.unwrap_or_default();

        let mut state = self.state.write().await;
        state.working = settings.clone();
        state.persisted = settings.clone();
        Ok(settings)
    }

    pub async fn current(&self) -> SettingsResponse {
        let state = self.state.read().await;
        SettingsResponse {
            settings: state.working.clone(),
            unsaved_changes: state.working != state.persisted,
        }
    }

    /// The last saved (or loaded) document.
    pub async fn persisted(&self) -> AcademicSettings {
        self.state.read().await.persisted.clone()
    }

    #[instrument(skip(self))]
    pub async fn save(&self) -> Result<AcademicSettings, AppError> {
        let mut state = self.state.write().await;
        let dates = &state.working.semester_dates;
        if dates.fall_start >= dates.fall_end || dates.spring_start >= dates.spring_end {
            return Err(AppError::bad_request(anyhow!(
                "Dönem başlangıç tarihi bitiş tarihinden önce olmalıdır"
            )));
        }

        self.store.put_json(&self.key, &state.working).await?;
        state.persisted = state.working.clone();
        info!(
            holidays = state.working.holidays.len(),
            exam_periods = state.working.exam_periods.len(),
            "Settings saved"
        );
        track_settings_saved();
        Ok(state.persisted.clone())
    }

    /// Restores the defaults and removes the stored document.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<AcademicSettings, AppError> {
        let mut state = self.state.write().await;
        self.store.delete(&self.key).await?;
        state.working = AcademicSettings::default();
        state.persisted = AcademicSettings::default();
        info!("Settings reset to defaults");
        Ok(state.working.clone())
    }

    pub async fn update_general(&self, dto: UpdateSettingsDto) -> AcademicSettings {
        let mut state = self.state.write().await;
        state.working.academic_year = dto.academic_year;
        state.working.semester_dates = dto.semester_dates;
        state.working.clone()
    }

    /// Adds a holiday with the next free id and keeps the list ordered by
    /// date. Holidays sharing a date keep their insertion order.
    pub async fn add_holiday(&self, dto: CreateHolidayDto) -> Holiday {
        let mut state = self.state.write().await;
        let holidays = &mut state.working.holidays;

        let id = holidays
            .iter()
            .map(|h| h.id)
            .max()
            .map_or(HolidayId(1), HolidayId::next);
        let holiday = Holiday {
            id,
            date: dto.date,
            name: dto.name,
            kind: dto.kind,
        };
        holidays.push(holiday.clone());
        holidays.sort_by_key(|h| h.date);
        holiday
    }

    pub async fn remove_holiday(&self, id: HolidayId) -> Result<Holiday, AppError> {
        let mut state = self.state.write().await;
        let holidays = &mut state.working.holidays;
        let index = holidays
            .iter()
            .position(|h| h.id == id)
            .ok_or_else(|| AppError::not_found(anyhow!("Tatil bulunamadı")))?;
        Ok(holidays.remove(index))
    }

    pub async fn add_exam_period(&self, dto: CreateExamPeriodDto) -> Result<ExamPeriod, AppError> {
        if dto.start_date >= dto.end_date {
            return Err(AppError::bad_request(anyhow!(
                "Başlangıç tarihi bitiş tarihinden önce olmalıdır"
            )));
        }

        let mut state = self.state.write().await;
        let periods = &mut state.working.exam_periods;

        let id = periods
            .iter()
            .map(|p| p.id)
            .max()
            .map_or(ExamPeriodId(1), ExamPeriodId::next);
        let period = ExamPeriod {
            id,
            name: dto.name,
            start_date: dto.start_date,
            end_date: dto.end_date,
            semester: dto.semester,
        };
        periods.push(period.clone());
        periods.sort_by_key(|p| p.start_date);
        Ok(period)
    }

    pub async fn remove_exam_period(&self, id: ExamPeriodId) -> Result<ExamPeriod, AppError> {
        let mut state = self.state.write().await;
        let periods = &mut state.working.exam_periods;
        let index = periods
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(anyhow!("Sınav dönemi bulunamadı")))?;
        Ok(periods.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yoklama_core::MemoryStore;
    use yoklama_models::settings::{HolidayType, Semester};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> (Arc<MemoryStore>, SettingsService) {
        let store = Arc::new(MemoryStore::new());
        let service = SettingsService::new(store.clone(), "academicSettings");
        (store, service)
    }

    fn test_holiday() -> CreateHolidayDto {
        CreateHolidayDto {
            date: date(2024, 12, 25),
            name: "Test".to_string(),
            kind: HolidayType::National,
        }
    }

    #[tokio::test]
    async fn test_add_holiday_keeps_list_sorted() {
        let (_, service) = service();
        let holiday = service.add_holiday(test_holiday()).await;
        assert_eq!(holiday.id, HolidayId(10));

        let settings = service.current().await.settings;
        let dates: Vec<_> = settings.holidays.iter().map(|h| h.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(
            settings
                .holidays
                .iter()
                .filter(|h| h.date == date(2024, 12, 25) && h.name == "Test")
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn test_same_date_holidays_keep_insertion_order() {
        let (_, service) = service();
        service.add_holiday(test_holiday()).await;
        service
            .add_holiday(CreateHolidayDto {
                name: "İkinci".to_string(),
                ..test_holiday()
            })
            .await;

        let settings = service.current().await.settings;
        let names: Vec<_> = settings
            .holidays
            .iter()
            .filter(|h| h.date == date(2024, 12, 25))
            .map(|h| h.name.as_str())
            .collect();
        assert_eq!(names, vec!["Test", "İkinci"]);
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let (store, service) = service();
        service.add_holiday(test_holiday()).await;
        assert!(service.current().await.unsaved_changes);
        service.save().await.unwrap();
        assert!(!service.current().await.unsaved_changes);

        let reloaded = SettingsService::new(store, "academicSettings");
        let settings = reloaded.load().await.unwrap();
        assert!(settings.holidays.iter().any(|h| h.date == date(2024, 12, 25)));
    }

    #[tokio::test]
    async fn test_unsaved_changes_are_not_persisted() {
        let (_, service) = service();
        service.add_holiday(test_holiday()).await;
        let persisted = service.persisted().await;
        assert!(!persisted.holidays.iter().any(|h| h.date == date(2024, 12, 25)));
    }

    #[tokio::test]
    async fn test_exam_period_requires_start_before_end() {
        let (_, service) = service();
        let err = service
            .add_exam_period(CreateExamPeriodDto {
                name: "Bütünleme".to_string(),
                start_date: date(2025, 6, 30),
                end_date: date(2025, 6, 30),
                semester: Semester::Spring,
            })
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Başlangıç tarihi bitiş tarihinden önce olmalıdır");
        assert_eq!(service.current().await.settings.exam_periods.len(), 4);
    }

    #[tokio::test]
    async fn test_exam_periods_sorted_by_start() {
        let (_, service) = service();
        let period = service
            .add_exam_period(CreateExamPeriodDto {
                name: "Güz Bütünleme".to_string(),
                start_date: date(2025, 1, 20),
                end_date: date(2025, 1, 24),
                semester: Semester::Fall,
            })
            .await
            .unwrap();
        assert_eq!(period.id, ExamPeriodId(5));

        let periods = service.current().await.settings.exam_periods;
        assert_eq!(periods[2].id, ExamPeriodId(5));
    }

    #[tokio::test]
    async fn test_remove_unknown_holiday_is_not_found() {
        let (_, service) = service();
        let err = service.remove_holiday(HolidayId(99)).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
        assert!(service.remove_holiday(HolidayId(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_removes_stored_document() {
        let (store, service) = service();
        service.add_holiday(test_holiday()).await;
        service.save().await.unwrap();
        service.reset().await.unwrap();

        assert_eq!(store.get("academicSettings").await.unwrap(), None);
        assert_eq!(service.current().await.settings, AcademicSettings::default());
    }

    #[tokio::test]
    async fn test_corrupt_document_fails_load_but_not_init() {
        let store = Arc::new(MemoryStore::new());
        store.put("academicSettings", "{not json").await.unwrap();

        let service = SettingsService::init(store.clone(), "academicSettings").await;
        assert_eq!(service.current().await.settings, AcademicSettings::default());
        assert_eq!(
            store.get("academicSettings").await.unwrap().as_deref(),
            Some("{not json")
        );

        let err = service.load().await.unwrap_err();
        assert_eq!(err.message(), "Kayıtlı ayarlar okunamadı");
        assert_eq!(err.status.as_u16(), 500);
    }

    #[tokio::test]
    async fn test_save_rejects_inverted_semester() {
        let (_, service) = service();
        let mut dates = AcademicSettings::default().semester_dates;
        dates.fall_end = dates.fall_start;
        service
            .update_general(UpdateSettingsDto {
                academic_year: "2024-2025".to_string(),
                semester_dates: dates,
            })
            .await;
        assert_eq!(service.save().await.unwrap_err().status.as_u16(), 400);
    }
}
