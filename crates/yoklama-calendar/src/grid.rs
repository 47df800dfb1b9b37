//! Month grid generation.
//!
//! The grid always has six Monday-first weeks. Cells before the 1st and after
//! the last day of the month belong to the neighbouring months and are marked
//! with `is_current_month = false`.

use std::collections::HashMap;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use yoklama_models::calendar::{DayCell, DayKind, ExamPeriodRef, MonthGrid, YearMonth};
use yoklama_models::settings::{ExamPeriod, Holiday};

pub const GRID_CELLS: usize = 42;

/// Date → holiday name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayLookup {
    names: HashMap<NaiveDate, String>,
}

impl HolidayLookup {
    pub fn get(&self, date: NaiveDate) -> Option<&str> {
        self.names.get(&date).map(String::as_str)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.names.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Builds the lookup for a holiday list. When several holidays share a date
/// the first one in list order names the day.
pub fn holiday_lookup(holidays: &[Holiday]) -> HolidayLookup {
    let mut names = HashMap::with_capacity(holidays.len());
    for holiday in holidays {
        names
            .entry(holiday.date)
            .or_insert_with(|| holiday.name.clone());
    }
    HolidayLookup { names }
}

/// Holiday wins over weekend, weekend over school day.
pub fn classify(date: NaiveDate, holidays: &HolidayLookup) -> DayKind {
    if holidays.contains(date) {
        DayKind::Holiday
    } else if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
        DayKind::Weekend
    } else {
        DayKind::School
    }
}

/// Moves `(year, month)` by `delta` whole months. `None` when the resulting
/// year does not fit in an `i32`.
pub fn shift_month(year: i32, month: u32, delta: i32) -> Option<(i32, u32)> {
    let index = i64::from(year) * 12 + i64::from(month) - 1 + i64::from(delta);
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    Some((year, index.rem_euclid(12) as u32 + 1))
}

/// First day of a month, `None` when `month` is outside 1-12.
pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Builds the 42-cell grid for the month containing `reference`.
///
/// `None` for the first and last months `NaiveDate` can represent, where the
/// Monday-aligned six weeks run off the supported range.
pub fn build_month_grid(
    reference: NaiveDate,
    holidays: &HolidayLookup,
    today: NaiveDate,
) -> Option<MonthGrid> {
    let (year, month) = (reference.year(), reference.month());
    let first = reference.with_day(1)?;
    let lead = u64::from(first.weekday().num_days_from_monday());
    let start = first.checked_sub_days(Days::new(lead))?;
    start.checked_add_days(Days::new(GRID_CELLS as u64 - 1))?;

    let cells = start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| DayCell {
            date,
            is_current_month: date.year() == year && date.month() == month,
            day_of_month: date.day(),
            classification: classify(date, holidays),
            is_today: date == today,
            holiday_name: holidays.get(date).map(str::to_string),
            exam_period: None,
        })
        .collect();

    let (prev_year, prev_month) = shift_month(year, month, -1)?;
    let (next_year, next_month) = shift_month(year, month, 1)?;

    Some(MonthGrid {
        year,
        month,
        cells,
        previous: YearMonth {
            year: prev_year,
            month: prev_month,
        },
        next: YearMonth {
            year: next_year,
            month: next_month,
        },
    })
}

/// Marks cells that fall inside an exam period (bounds inclusive). The first
/// matching period in list order wins.
pub fn annotate_exam_periods(grid: &mut MonthGrid, periods: &[ExamPeriod]) {
    for cell in &mut grid.cells {
        cell.exam_period = periods
            .iter()
            .find(|p| p.contains(cell.date))
            .map(ExamPeriodRef::from);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoklama_models::settings::{AcademicSettings, HolidayType};
    use yoklama_models::ids::HolidayId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn defaults() -> HolidayLookup {
        holiday_lookup(&AcademicSettings::default().holidays)
    }

    #[test]
    fn test_november_2024_grid() {
        let grid = build_month_grid(date(2024, 11, 15), &defaults(), date(2024, 11, 12)).unwrap();

        assert_eq!(grid.cells.len(), GRID_CELLS);
        assert_eq!(grid.cells[0].date, date(2024, 10, 28));
        assert!(!grid.cells[0].is_current_month);

        let cell = |d: NaiveDate| grid.cells.iter().find(|c| c.date == d).unwrap();
        assert_eq!(cell(date(2024, 11, 10)).classification, DayKind::Holiday);
        assert_eq!(
            cell(date(2024, 11, 10)).holiday_name.as_deref(),
            Some("Atatürk'ü Anma Günü")
        );
        assert_eq!(cell(date(2024, 11, 9)).classification, DayKind::Weekend);
        assert_eq!(cell(date(2024, 11, 11)).classification, DayKind::School);
        assert!(cell(date(2024, 11, 12)).is_today);
        assert_eq!(grid.cells.iter().filter(|c| c.is_today).count(), 1);
        assert_eq!(grid.previous, YearMonth { year: 2024, month: 10 });
        assert_eq!(grid.next, YearMonth { year: 2024, month: 12 });
    }

    #[test]
    fn test_first_of_month_in_its_monday_first_column() {
        let lookup = HolidayLookup::default();
        for month in 1..=12 {
            let first = date(2025, month, 1);
            let grid = build_month_grid(first, &lookup, first).unwrap();
            let index = grid.cells.iter().position(|c| c.date == first).unwrap();
            assert_eq!(index as u32, first.weekday().num_days_from_monday());
            assert_eq!(grid.cells.len(), GRID_CELLS);
            assert_eq!(grid.cells[0].date.weekday(), Weekday::Mon);
        }
    }

    #[test]
    fn test_months_at_the_edges_of_the_date_range() {
        let lookup = HolidayLookup::default();
        let (max, min) = (NaiveDate::MAX, NaiveDate::MIN);

        let last = month_start(max.year(), max.month()).unwrap();
        assert!(build_month_grid(last, &lookup, last).is_none());
        let first = month_start(min.year(), min.month()).unwrap();
        assert!(build_month_grid(first, &lookup, first).is_none());

        // Neighbours that still fit keep the full Monday-aligned grid.
        for (y, m) in [(max.year(), max.month() - 1), (min.year(), min.month() + 1)] {
            let reference = month_start(y, m).unwrap();
            let grid = build_month_grid(reference, &lookup, reference).unwrap();
            assert_eq!(grid.cells.len(), GRID_CELLS);
            assert_eq!(grid.cells[0].date.weekday(), Weekday::Mon);
        }
    }

    #[test]
    fn test_month_starting_on_monday_has_no_lead() {
        // September 2025 starts on a Monday.
        let grid = build_month_grid(date(2025, 9, 20), &HolidayLookup::default(), date(2025, 1, 1))
            .unwrap();
        assert_eq!(grid.cells[0].date, date(2025, 9, 1));
        assert_eq!(grid.cells[41].date, date(2025, 10, 12));
    }

    #[test]
    fn test_holiday_on_weekend_is_holiday() {
        let lookup = defaults();
        // 2025-03-30 is a Sunday.
        assert_eq!(classify(date(2025, 3, 30), &lookup), DayKind::Holiday);
        assert_eq!(classify(date(2025, 3, 29), &lookup), DayKind::Weekend);
    }

    #[test]
    fn test_first_holiday_names_shared_date() {
        let holidays = vec![
            Holiday {
                id: HolidayId(1),
                date: date(2024, 12, 25),
                name: "Birinci".into(),
                kind: HolidayType::Other,
            },
            Holiday {
                id: HolidayId(2),
                date: date(2024, 12, 25),
                name: "İkinci".into(),
                kind: HolidayType::Academic,
            },
        ];
        let lookup = holiday_lookup(&holidays);
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get(date(2024, 12, 25)), Some("Birinci"));
    }

    #[test]
    fn test_shift_month_wraps_years() {
        assert_eq!(shift_month(2024, 1, -1), Some((2023, 12)));
        assert_eq!(shift_month(2024, 12, 1), Some((2025, 1)));
        assert_eq!(shift_month(2024, 5, 0), Some((2024, 5)));
        assert_eq!(shift_month(2024, 3, -15), Some((2022, 12)));
        assert_eq!(shift_month(2024, 11, 14), Some((2026, 1)));
    }

    #[test]
    fn test_shift_month_at_i32_limits() {
        assert_eq!(shift_month(i32::MAX, 12, 1), None);
        assert_eq!(shift_month(i32::MIN, 1, -1), None);
        assert_eq!(shift_month(200_000_000, 6, 1), Some((200_000_000, 7)));
        assert_eq!(shift_month(i32::MAX, 11, 1), Some((i32::MAX, 12)));
    }

    #[test]
    fn test_exam_periods_are_annotated_inclusively() {
        let settings = AcademicSettings::default();
        let mut grid = build_month_grid(date(2024, 11, 1), &defaults(), date(2024, 11, 1)).unwrap();
        annotate_exam_periods(&mut grid, &settings.exam_periods);

        let cell = |d: NaiveDate| grid.cells.iter().find(|c| c.date == d).unwrap();
        assert!(cell(date(2024, 11, 11)).exam_period.is_some());
        assert!(cell(date(2024, 11, 22)).exam_period.is_some());
        assert!(cell(date(2024, 11, 23)).exam_period.is_none());
        assert!(cell(date(2024, 11, 8)).exam_period.is_none());
    }
}
