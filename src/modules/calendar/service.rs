use anyhow::anyhow;
use chrono::{Datelike, NaiveDate};
use tracing::instrument;

use yoklama_calendar::grid::month_start;
use yoklama_calendar::{annotate_exam_periods, build_month_grid, classify, holiday_lookup};
use yoklama_core::AppError;
use yoklama_models::settings::AcademicSettings;

use super::model::{DayInfo, MonthGrid, MonthQuery};

pub struct CalendarService;

impl CalendarService {
    /// Month grid for the requested month, defaulting to the month of `today`.
    #[instrument(skip(settings))]
    pub fn month(
        settings: &AcademicSettings,
        query: &MonthQuery,
        today: NaiveDate,
    ) -> Result<MonthGrid, AppError> {
        let year = query.year.unwrap_or(today.year());
        let month = query.month.unwrap_or(today.month());
        let invalid = || AppError::bad_request(anyhow!("Geçersiz ay: {}-{}", year, month));
        let reference = month_start(year, month).ok_or_else(invalid)?;

        let lookup = holiday_lookup(&settings.holidays);
        let mut grid = build_month_grid(reference, &lookup, today).ok_or_else(invalid)?;
        annotate_exam_periods(&mut grid, &settings.exam_periods);
        Ok(grid)
    }

    /// Classification of one date together with the holidays and exam
    /// periods that cover it.
    pub fn day(settings: &AcademicSettings, date: NaiveDate) -> DayInfo {
        let lookup = holiday_lookup(&settings.holidays);
        DayInfo {
            date,
            classification: classify(date, &lookup),
            holidays: settings
                .holidays
                .iter()
                .filter(|h| h.date == date)
                .cloned()
                .collect(),
            exam_periods: settings
                .exam_periods
                .iter()
                .filter(|p| p.contains(date))
                .cloned()
                .collect(),
        }
    }
}
