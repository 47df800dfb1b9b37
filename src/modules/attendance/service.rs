use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use yoklama_calendar::{classify, holiday_lookup};
use yoklama_core::AppError;
use yoklama_models::calendar::DayKind;
use yoklama_models::courses::CourseWithRoster;
use yoklama_models::ids::{CourseId, UserId};
use yoklama_models::settings::AcademicSettings;

use super::model::{AttendanceHistory, AttendanceSession, RecordAttendanceDto};

/// Share of present or late records, as a percentage rounded to one decimal.
pub fn attendance_rate<'a>(sessions: impl IntoIterator<Item = &'a AttendanceSession>) -> Option<f64> {
    let (attended, total) = sessions
        .into_iter()
        .flat_map(|s| s.records.iter())
        .fold((0usize, 0usize), |(attended, total), record| {
            (
                attended + usize::from(record.status.counts_as_present()),
                total + 1,
            )
        });
    (total > 0).then(|| (attended as f64 * 1000.0 / total as f64).round() / 10.0)
}

/// Attendance sessions keyed by course and date.
#[derive(Clone, Default)]
pub struct AttendanceService {
    sessions: Arc<RwLock<BTreeMap<(CourseId, NaiveDate), AttendanceSession>>>,
}

impl AttendanceService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records (or replaces) the session for `course` on `date`.
    #[instrument(skip(self, course, settings, dto), fields(course_id = %course.course.id))]
    pub async fn record(
        &self,
        course: &CourseWithRoster,
        date: NaiveDate,
        dto: RecordAttendanceDto,
        recorded_by: UserId,
        settings: &AcademicSettings,
        today: NaiveDate,
    ) -> Result<AttendanceSession, AppError> {
        if date > today {
            return Err(AppError::bad_request(anyhow!(
                "Gelecek bir tarih için yoklama alınamaz"
            )));
        }
        if classify(date, &holiday_lookup(&settings.holidays)) == DayKind::Holiday {
            return Err(AppError::bad_request(anyhow!("Tatil gününde yoklama alınamaz")));
        }

        let roster: HashSet<_> = course.students.iter().map(|s| s.id).collect();
        let mut seen = HashSet::with_capacity(dto.records.len());
        for record in &dto.records {
            if !roster.contains(&record.student_id) {
                return Err(AppError::bad_request(anyhow!(
                    "Öğrenci bu derse kayıtlı değil: {}",
                    record.student_id
                )));
            }
            if !seen.insert(record.student_id) {
                return Err(AppError::bad_request(anyhow!(
                    "Aynı öğrenci birden fazla kez işaretlenmiş: {}",
                    record.student_id
                )));
            }
        }

        let session = AttendanceSession {
            course_id: course.course.id,
            date,
            records: dto.records,
            recorded_by,
            recorded_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().await;
        let replaced = sessions
            .insert((session.course_id, date), session.clone())
            .is_some();
        info!(%date, records = session.records.len(), replaced, "Attendance recorded");
        Ok(session)
    }

    pub async fn get(&self, course_id: CourseId, date: NaiveDate) -> Result<AttendanceSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&(course_id, date))
            .cloned()
            .ok_or_else(|| AppError::not_found(anyhow!("Bu tarih için yoklama kaydı bulunamadı")))
    }

    pub async fn history(&self, course_id: CourseId) -> AttendanceHistory {
        let sessions = self.sessions.read().await;
        let course_sessions: Vec<&AttendanceSession> = sessions
            .range((course_id, NaiveDate::MIN)..=(course_id, NaiveDate::MAX))
            .map(|(_, s)| s)
            .collect();

        AttendanceHistory {
            course_id,
            sessions: course_sessions.iter().map(|s| s.summary()).collect(),
            attendance_rate: attendance_rate(course_sessions.iter().copied()),
        }
    }

    /// Sessions in `[from, to]`, optionally limited to one course.
    pub async fn sessions_between(
        &self,
        course_id: Option<CourseId>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<AttendanceSession> {
        self.sessions
            .read()
            .await
            .values()
            .filter(|s| course_id.is_none_or(|id| s.course_id == id))
            .filter(|s| from <= s.date && s.date <= to)
            .cloned()
            .collect()
    }

    /// Number of sessions and the overall attendance rate.
    pub async fn overview(&self) -> (usize, Option<f64>) {
        let sessions = self.sessions.read().await;
        (sessions.len(), attendance_rate(sessions.values()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoklama_models::attendance::{AttendanceRecord, AttendanceStatus};
    use yoklama_models::courses::sample_catalog;
    use yoklama_models::ids::StudentId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn course() -> CourseWithRoster {
        sample_catalog().courses.remove(0)
    }

    fn records(statuses: &[(i64, AttendanceStatus)]) -> RecordAttendanceDto {
        RecordAttendanceDto {
            records: statuses
                .iter()
                .map(|&(id, status)| AttendanceRecord {
                    student_id: StudentId(id),
                    status,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_record_and_overwrite() {
        let service = AttendanceService::new();
        let settings = AcademicSettings::default();
        let today = date(2024, 11, 15);
        let course = course();

        service
            .record(
                &course,
                date(2024, 11, 4),
                records(&[(1001, AttendanceStatus::Absent)]),
                UserId::new(),
                &settings,
                today,
            )
            .await
            .unwrap();
        service
            .record(
                &course,
                date(2024, 11, 4),
                records(&[(1001, AttendanceStatus::Present), (1002, AttendanceStatus::Late)]),
                UserId::new(),
                &settings,
                today,
            )
            .await
            .unwrap();

        let session = service.get(CourseId(1), date(2024, 11, 4)).await.unwrap();
        assert_eq!(session.records.len(), 2);
        let history = service.history(CourseId(1)).await;
        assert_eq!(history.sessions.len(), 1);
        assert_eq!(history.attendance_rate, Some(100.0));
    }

    #[tokio::test]
    async fn test_rejects_holiday_future_and_unknown_student() {
        let service = AttendanceService::new();
        let settings = AcademicSettings::default();
        let today = date(2024, 11, 15);
        let course = course();
        let user = UserId::new();

        let holiday = service
            .record(
                &course,
                date(2024, 10, 29),
                records(&[(1001, AttendanceStatus::Present)]),
                user,
                &settings,
                today,
            )
            .await
            .unwrap_err();
        assert_eq!(holiday.message(), "Tatil gününde yoklama alınamaz");

        let future = service
            .record(
                &course,
                date(2024, 11, 18),
                records(&[(1001, AttendanceStatus::Present)]),
                user,
                &settings,
                today,
            )
            .await
            .unwrap_err();
        assert_eq!(future.status.as_u16(), 400);

        let stranger = service
            .record(
                &course,
                date(2024, 11, 4),
                records(&[(2001, AttendanceStatus::Present)]),
                user,
                &settings,
                today,
            )
            .await
            .unwrap_err();
        assert!(stranger.message().contains("2001"));

        assert_eq!(service.overview().await, (0, None));
    }

    #[test]
    fn test_attendance_rate_rounds() {
        let session = AttendanceSession {
            course_id: CourseId(1),
            date: date(2024, 11, 4),
            records: vec![
                AttendanceRecord {
                    student_id: StudentId(1),
                    status: AttendanceStatus::Present,
                },
                AttendanceRecord {
                    student_id: StudentId(2),
                    status: AttendanceStatus::Absent,
                },
                AttendanceRecord {
                    student_id: StudentId(3),
                    status: AttendanceStatus::Excused,
                },
            ],
            recorded_by: UserId::new(),
            recorded_at: Utc::now(),
        };
        assert_eq!(attendance_rate([&session]), Some(33.3));
        assert_eq!(attendance_rate(std::iter::empty::<&AttendanceSession>()), None);
    }
}
