//! Academic calendar settings.
//!
//! The whole settings object is persisted as one JSON document (see
//! `yoklama_core::storage`). Its field names are camelCase on the wire and on
//! disk: `academicYear`, `semesterDates`, `holidays`, `examPeriods`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{ExamPeriodId, HolidayId};

/// Holiday category.
///
/// Unknown categories found in older documents deserialize as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HolidayType {
    National,
    Religious,
    Academic,
    #[serde(other)]
    Other,
}

impl HolidayType {
    /// Turkish label used by the settings screen.
    pub fn label(self) -> &'static str {
        match self {
            Self::National => "Milli Bayram",
            Self::Religious => "Dini Bayram",
            Self::Academic => "Akademik Tatil",
            Self::Other => "Diğer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    Fall,
    Spring,
}

impl Semester {
    pub fn label(self) -> &'static str {
        match self {
            Self::Fall => "Güz Dönemi",
            Self::Spring => "Bahar Dönemi",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: HolidayId,
    pub date: NaiveDate,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HolidayType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamPeriod {
    pub id: ExamPeriodId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub semester: Semester,
}

impl ExamPeriod {
    /// Inclusive containment.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterDates {
    pub fall_start: NaiveDate,
    pub fall_end: NaiveDate,
    pub spring_start: NaiveDate,
    pub spring_end: NaiveDate,
}

/// The persisted academic settings document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcademicSettings {
    pub academic_year: String,
    pub semester_dates: SemesterDates,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default)]
    pub exam_periods: Vec<ExamPeriod>,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    // Only called with literal, valid dates below.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

impl Default for AcademicSettings {
    /// The 2024-2025 Turkish academic calendar.
    fn default() -> Self {
        let holiday = |id: i64, date: NaiveDate, name: &str, kind: HolidayType| Holiday {
            id: HolidayId(id),
            date,
            name: name.to_string(),
            kind,
        };
        let exam = |id: i64, name: &str, start: NaiveDate, end: NaiveDate, semester| ExamPeriod {
            id: ExamPeriodId(id),
            name: name.to_string(),
            start_date: start,
            end_date: end,
            semester,
        };

        Self {
            academic_year: "2024-2025".to_string(),
            semester_dates: SemesterDates {
                fall_start: ymd(2024, 9, 9),
                fall_end: ymd(2025, 1, 17),
                spring_start: ymd(2025, 2, 3),
                spring_end: ymd(2025, 6, 20),
            },
            holidays: vec![
                holiday(1, ymd(2024, 10, 29), "Cumhuriyet Bayramı", HolidayType::National),
                holiday(2, ymd(2024, 11, 10), "Atatürk'ü Anma Günü", HolidayType::National),
                holiday(3, ymd(2025, 1, 1), "Yılbaşı", HolidayType::National),
                holiday(4, ymd(2025, 3, 30), "Ramazan Bayramı", HolidayType::Religious),
                holiday(5, ymd(2025, 3, 31), "Ramazan Bayramı (2. Gün)", HolidayType::Religious),
                holiday(
                    6,
                    ymd(2025, 4, 23),
                    "Ulusal Egemenlik ve Çocuk Bayramı",
                    HolidayType::National,
                ),
                holiday(7, ymd(2025, 5, 1), "Emek ve Dayanışma Günü", HolidayType::National),
                holiday(
                    8,
                    ymd(2025, 5, 19),
                    "Atatürk'ü Anma, Gençlik ve Spor Bayramı",
                    HolidayType::National,
                ),
                holiday(9, ymd(2025, 6, 6), "Kurban Bayramı", HolidayType::Religious),
            ],
            exam_periods: vec![
                exam(
                    1,
                    "Güz Ara Sınavları",
                    ymd(2024, 11, 11),
                    ymd(2024, 11, 22),
                    Semester::Fall,
                ),
                exam(
                    2,
                    "Güz Final Sınavları",
                    ymd(2025, 1, 6),
                    ymd(2025, 1, 17),
                    Semester::Fall,
                ),
                exam(
                    3,
                    "Bahar Ara Sınavları",
                    ymd(2025, 4, 7),
                    ymd(2025, 4, 18),
                    Semester::Spring,
                ),
                exam(
                    4,
                    "Bahar Final Sınavları",
                    ymd(2025, 6, 9),
                    ymd(2025, 6, 20),
                    Semester::Spring,
                ),
            ],
        }
    }
}

/// DTO for adding a holiday.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHolidayDto {
    pub date: NaiveDate,
    #[validate(length(min = 1, max = 100, message = "Tatil adı 1-100 karakter olmalıdır"))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HolidayType,
}

/// DTO for adding an exam period.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExamPeriodDto {
    #[validate(length(min = 1, max = 100, message = "Sınav dönemi adı 1-100 karakter olmalıdır"))]
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub semester: Semester,
}

/// DTO for the general section of the settings screen.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsDto {
    #[validate(length(min = 1, max = 20, message = "Akademik yıl 1-20 karakter olmalıdır"))]
    pub academic_year: String,
    pub semester_dates: SemesterDates,
}

/// Settings as returned by the settings endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    #[serde(flatten)]
    pub settings: AcademicSettings,
    /// Whether the working copy differs from the persisted document
    pub unsaved_changes: bool,
}
