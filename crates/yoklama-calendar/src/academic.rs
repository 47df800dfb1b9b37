//! Queries over the academic settings.

use chrono::NaiveDate;
use yoklama_models::calendar::DayKind;
use yoklama_models::settings::{AcademicSettings, ExamPeriod, Holiday, Semester, SemesterDates};

use crate::grid::{classify, holiday_lookup};

/// Semester containing `date`, bounds inclusive.
pub fn semester_for(date: NaiveDate, dates: &SemesterDates) -> Option<Semester> {
    if dates.fall_start <= date && date <= dates.fall_end {
        Some(Semester::Fall)
    } else if dates.spring_start <= date && date <= dates.spring_end {
        Some(Semester::Spring)
    } else {
        None
    }
}

/// The next `n` holidays on or after `from`, ordered by date.
pub fn upcoming_holidays(settings: &AcademicSettings, from: NaiveDate, n: usize) -> Vec<Holiday> {
    let mut holidays: Vec<Holiday> = settings
        .holidays
        .iter()
        .filter(|h| h.date >= from)
        .cloned()
        .collect();
    holidays.sort_by_key(|h| h.date);
    holidays.truncate(n);
    holidays
}

/// Exam periods that have not ended by `from`, ordered by start date.
pub fn upcoming_exam_periods(
    settings: &AcademicSettings,
    from: NaiveDate,
    n: usize,
) -> Vec<ExamPeriod> {
    let mut periods: Vec<ExamPeriod> = settings
        .exam_periods
        .iter()
        .filter(|p| p.end_date >= from)
        .cloned()
        .collect();
    periods.sort_by_key(|p| p.start_date);
    periods.truncate(n);
    periods
}

/// School days between `from` and `to` (inclusive) that fall inside a
/// semester. Zero when `from > to`.
pub fn count_instruction_days(settings: &AcademicSettings, from: NaiveDate, to: NaiveDate) -> usize {
    if from > to {
        return 0;
    }
    let lookup = holiday_lookup(&settings.holidays);
    from.iter_days()
        .take_while(|d| *d <= to)
        .filter(|d| semester_for(*d, &settings.semester_dates).is_some())
        .filter(|d| classify(*d, &lookup) == DayKind::School)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_semester_for() {
        let dates = AcademicSettings::default().semester_dates;
        assert_eq!(semester_for(date(2024, 9, 9), &dates), Some(Semester::Fall));
        assert_eq!(semester_for(date(2025, 1, 17), &dates), Some(Semester::Fall));
        assert_eq!(semester_for(date(2025, 1, 25), &dates), None);
        assert_eq!(semester_for(date(2025, 4, 1), &dates), Some(Semester::Spring));
        assert_eq!(semester_for(date(2025, 7, 1), &dates), None);
    }

    #[test]
    fn test_upcoming_holidays() {
        let settings = AcademicSettings::default();
        let next = upcoming_holidays(&settings, date(2024, 11, 1), 3);
        let dates: Vec<_> = next.iter().map(|h| h.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 11, 10), date(2025, 1, 1), date(2025, 3, 30)]
        );
        assert!(upcoming_holidays(&settings, date(2025, 7, 1), 3).is_empty());
    }

    #[test]
    fn test_upcoming_exam_periods_include_running_period() {
        let settings = AcademicSettings::default();
        let periods = upcoming_exam_periods(&settings, date(2024, 11, 15), 2);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].name, "Güz Ara Sınavları");
    }

    #[test]
    fn test_count_instruction_days() {
        let settings = AcademicSettings::default();
        // 2024-10-28 .. 2024-11-03: Tuesday 29th is a holiday, weekend excluded.
        assert_eq!(
            count_instruction_days(&settings, date(2024, 10, 28), date(2024, 11, 3)),
            4
        );
        // Before the fall semester starts.
        assert_eq!(
            count_instruction_days(&settings, date(2024, 9, 2), date(2024, 9, 6)),
            0
        );
        assert_eq!(
            count_instruction_days(&settings, date(2024, 11, 3), date(2024, 11, 1)),
            0
        );
    }
}
