use chrono::NaiveDate;

use yoklama_calendar::academic::{semester_for, upcoming_exam_periods, upcoming_holidays};
use yoklama_calendar::{classify, holiday_lookup};
use yoklama_models::schedule::TodayClass;
use yoklama_models::settings::AcademicSettings;

use crate::modules::courses::service::CourseService;

use super::model::{DashboardResponse, DashboardStats};

const UPCOMING_HOLIDAYS: usize = 3;
const UPCOMING_EXAM_PERIODS: usize = 2;

pub struct DashboardService;

impl DashboardService {
    /// Assembles the landing page summary for `today`.
    pub fn build(
        settings: &AcademicSettings,
        today: NaiveDate,
        today_classes: Vec<TodayClass>,
        courses: &CourseService,
        (sessions_recorded, attendance_rate): (usize, Option<f64>),
    ) -> DashboardResponse {
        let lookup = holiday_lookup(&settings.holidays);

        DashboardResponse {
            today,
            today_kind: classify(today, &lookup),
            today_holiday: lookup.get(today).map(str::to_string),
            academic_year: settings.academic_year.clone(),
            current_semester: semester_for(today, &settings.semester_dates),
            today_classes,
            stats: DashboardStats {
                course_count: courses.entries().len(),
                student_count: courses.total_students(),
                sessions_recorded,
                attendance_rate,
            },
            upcoming_holidays: upcoming_holidays(settings, today, UPCOMING_HOLIDAYS),
            upcoming_exam_periods: upcoming_exam_periods(settings, today, UPCOMING_EXAM_PERIODS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoklama_models::calendar::DayKind;
    use yoklama_models::courses::sample_catalog;
    use yoklama_models::settings::Semester;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_school_day_in_fall() {
        let courses = CourseService::new(sample_catalog());
        let dashboard = DashboardService::build(
            &AcademicSettings::default(),
            date(2024, 11, 4),
            Vec::new(),
            &courses,
            (0, None),
        );

        assert_eq!(dashboard.today_kind, DayKind::School);
        assert_eq!(dashboard.current_semester, Some(Semester::Fall));
        assert_eq!(dashboard.stats.course_count, 5);
        assert_eq!(dashboard.stats.student_count, 140);
        assert!(dashboard.upcoming_holidays.len() <= UPCOMING_HOLIDAYS);
        assert!(dashboard.upcoming_holidays.iter().all(|h| h.date >= date(2024, 11, 4)));
    }

    #[test]
    fn test_holiday_is_named() {
        let courses = CourseService::new(sample_catalog());
        let dashboard = DashboardService::build(
            &AcademicSettings::default(),
            date(2024, 10, 29),
            Vec::new(),
            &courses,
            (3, Some(87.5)),
        );

        assert_eq!(dashboard.today_kind, DayKind::Holiday);
        assert_eq!(dashboard.today_holiday.as_deref(), Some("Cumhuriyet Bayramı"));
        assert_eq!(dashboard.stats.sessions_recorded, 3);
    }
}
