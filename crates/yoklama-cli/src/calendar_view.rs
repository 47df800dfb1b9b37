//! Terminal rendering of a [`MonthGrid`].

use std::collections::HashSet;

use yoklama_models::calendar::{DayKind, MonthGrid};

const MONTH_NAMES: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];

const WEEKDAY_HEADER: &str = " Pzt  Sal  Çar  Per  Cum  Cmt  Paz";

pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?")
}

/// Six rows of seven columns. Holidays are marked `*`, exam period days `!`,
/// days of neighbouring months are dotted out.
pub fn render_month(grid: &MonthGrid) -> String {
    let mut lines = vec![
        format!("{} {}", month_name(grid.month), grid.year),
        WEEKDAY_HEADER.to_string(),
    ];

    lines.extend(grid.weeks().map(|week| {
        week.iter()
            .map(|cell| {
                if !cell.is_current_month {
                    return "   .".to_string();
                }
                let marker = match (cell.classification, &cell.exam_period) {
                    (DayKind::Holiday, _) => '*',
                    (_, Some(_)) => '!',
                    _ if cell.is_today => '<',
                    _ => ' ',
                };
                format!("{:>3}{}", cell.day_of_month, marker)
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }));

    let in_month = || grid.cells.iter().filter(|c| c.is_current_month);

    let holidays: Vec<String> = in_month()
        .filter_map(|c| {
            c.holiday_name
                .as_ref()
                .map(|name| format!("  * {} {}", c.date.format("%d.%m"), name))
        })
        .collect();
    if !holidays.is_empty() {
        lines.push(String::new());
        lines.extend(holidays);
    }

    // Overlapping periods can interleave across the month; list each once.
    let mut seen = HashSet::new();
    lines.extend(
        in_month()
            .filter_map(|c| c.exam_period.as_ref())
            .filter(|period| seen.insert(period.id))
            .map(|period| format!("  ! {}", period.name)),
    );

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use yoklama_calendar::{HolidayLookup, annotate_exam_periods, build_month_grid, holiday_lookup};
    use yoklama_models::ids::ExamPeriodId;
    use yoklama_models::settings::{AcademicSettings, ExamPeriod, Semester};

    fn november_2024() -> MonthGrid {
        let settings = AcademicSettings::default();
        let mut grid = build_month_grid(
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            &holiday_lookup(&settings.holidays),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        )
        .unwrap();
        annotate_exam_periods(&mut grid, &settings.exam_periods);
        grid
    }

    #[test]
    fn test_render_has_header_and_six_weeks() {
        let text = render_month(&november_2024());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Kasım 2024");
        assert_eq!(lines[1], WEEKDAY_HEADER);
        // October 28-31 lead the first week
        assert!(lines[2].starts_with("   .    .    .    .   1"));
        assert!(lines[2..8].iter().all(|l| !l.is_empty()));
    }

    #[test]
    fn test_holiday_is_marked_and_listed() {
        let text = render_month(&november_2024());
        assert!(text.contains(" 10*"));
        assert!(text.contains("* 10.11 Atatürk'ü Anma Günü"));
    }

    #[test]
    fn test_interleaved_exam_periods_listed_once() {
        let period = |id, name: &str, start, end| ExamPeriod {
            id: ExamPeriodId(id),
            name: name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 11, start).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 11, end).unwrap(),
            semester: Semester::Fall,
        };
        // The short period wins its days, splitting the long one in two.
        let periods = [period(2, "Telafi", 12, 13), period(1, "Ara Sınav", 4, 22)];
        let mut grid = build_month_grid(
            NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            &HolidayLookup::default(),
            NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        )
        .unwrap();
        annotate_exam_periods(&mut grid, &periods);

        let text = render_month(&grid);
        let listed: Vec<&str> = text.lines().filter(|l| l.starts_with("  ! ")).collect();
        assert_eq!(listed, ["  ! Ara Sınav", "  ! Telafi"]);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), "Ocak");
        assert_eq!(month_name(12), "Aralık");
        assert_eq!(month_name(13), "?");
    }
}
