use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveTime, Weekday};
use tokio::sync::RwLock;
use tracing::{info, instrument};

use yoklama_calendar::{ScheduleError, TimeGrid, WeeklySchedule};
use yoklama_config::ScheduleConfig;
use yoklama_core::AppError;
use yoklama_models::ids::UserId;

use crate::modules::courses::service::CourseService;

use super::model::{CreateSlotDto, ScheduleGrid, ScheduleSlot, SchoolDay, TodayClass};

fn schedule_error(err: ScheduleError) -> AppError {
    match err {
        ScheduleError::Overlap { .. } => AppError::conflict(err),
        ScheduleError::NotFound { .. } => AppError::not_found(err),
        _ => AppError::bad_request(err),
    }
}

/// Weekly schedules, one per teacher, kept in memory.
#[derive(Clone)]
pub struct ScheduleService {
    grid: TimeGrid,
    schedules: Arc<RwLock<HashMap<UserId, WeeklySchedule>>>,
}

impl ScheduleService {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            grid: TimeGrid::new(config.day_start_hour, config.day_end_hour),
            schedules: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn slots(&self, user: UserId) -> Vec<ScheduleSlot> {
        let schedules = self.schedules.read().await;
        schedules
            .get(&user)
            .map(|s| s.slots().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn slots_on(&self, user: UserId, day: SchoolDay) -> Vec<ScheduleSlot> {
        let schedules = self.schedules.read().await;
        schedules
            .get(&user)
            .map(|s| s.slots_on(day).cloned().collect())
            .unwrap_or_default()
    }

    pub async fn grid(&self, user: UserId) -> ScheduleGrid {
        let schedules = self.schedules.read().await;
        match schedules.get(&user) {
            Some(schedule) => schedule.render(),
            None => WeeklySchedule::new(self.grid).render(),
        }
    }

    /// Classes on `weekday` joined with their courses, in start order.
    /// Empty on weekends.
    pub async fn classes_on(
        &self,
        user: UserId,
        weekday: Weekday,
        courses: &CourseService,
    ) -> Vec<TodayClass> {
        let Some(day) = SchoolDay::from_weekday(weekday) else {
            return Vec::new();
        };

        self.slots_on(user, day)
            .await
            .into_iter()
            .filter_map(|slot| {
                let course = courses.get(slot.course_id).ok()?;
                Some(TodayClass {
                    slot_id: slot.id,
                    start_time: slot.start_time,
                    end_time: slot.end_time(),
                    course,
                })
            })
            .collect()
    }

    #[instrument(skip(self))]
    pub async fn add_slot(&self, user: UserId, dto: CreateSlotDto) -> Result<ScheduleSlot, AppError> {
        let mut schedules = self.schedules.write().await;
        let schedule = schedules
            .entry(user)
            .or_insert_with(|| WeeklySchedule::new(self.grid));

        let slot = schedule
            .add_slot(dto.day, dto.start_time, dto.course_id, dto.duration_hours)
            .map_err(schedule_error)?
            .clone();
        info!(slot_id = %slot.id, day = %slot.day, "Schedule slot saved");
        Ok(slot)
    }

    #[instrument(skip(self))]
    pub async fn remove_slot(
        &self,
        user: UserId,
        day: SchoolDay,
        start: NaiveTime,
    ) -> Result<ScheduleSlot, AppError> {
        let mut schedules = self.schedules.write().await;
        let schedule = schedules
            .get_mut(&user)
            .ok_or_else(|| schedule_error(ScheduleError::NotFound { day, start }))?;
        schedule.remove_slot(day, start).map_err(schedule_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yoklama_models::ids::CourseId;

    fn at(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    fn dto(day: SchoolDay, hour: u32, course: i64, duration: u32) -> CreateSlotDto {
        CreateSlotDto {
            day,
            start_time: at(hour),
            course_id: CourseId(course),
            duration_hours: duration,
        }
    }

    #[tokio::test]
    async fn test_schedules_are_per_user() {
        let service = ScheduleService::new(ScheduleConfig::default());
        let (alice, bob) = (UserId::new(), UserId::new());

        service
            .add_slot(alice, dto(SchoolDay::Monday, 9, 1, 2))
            .await
            .unwrap();
        assert_eq!(service.slots(alice).await.len(), 1);
        assert!(service.slots(bob).await.is_empty());
        assert_eq!(service.grid(bob).await.rows.len(), 10);
    }

    #[tokio::test]
    async fn test_errors_map_to_statuses() {
        let service = ScheduleService::new(ScheduleConfig::default());
        let user = UserId::new();
        service
            .add_slot(user, dto(SchoolDay::Monday, 9, 1, 2))
            .await
            .unwrap();

        let overlap = service
            .add_slot(user, dto(SchoolDay::Monday, 10, 2, 1))
            .await
            .unwrap_err();
        assert_eq!(overlap.status.as_u16(), 409);

        let off_grid = service
            .add_slot(user, dto(SchoolDay::Monday, 19, 2, 1))
            .await
            .unwrap_err();
        assert_eq!(off_grid.status.as_u16(), 400);

        let missing = service
            .remove_slot(user, SchoolDay::Friday, at(9))
            .await
            .unwrap_err();
        assert_eq!(missing.status.as_u16(), 404);
    }

    #[tokio::test]
    async fn test_classes_on_joins_courses() {
        use yoklama_models::courses::sample_catalog;

        let service = ScheduleService::new(ScheduleConfig::default());
        let courses = CourseService::new(sample_catalog());
        let user = UserId::new();
        service
            .add_slot(user, dto(SchoolDay::Tuesday, 13, 3, 2))
            .await
            .unwrap();
        service
            .add_slot(user, dto(SchoolDay::Tuesday, 8, 1, 1))
            .await
            .unwrap();

        let classes = service.classes_on(user, Weekday::Tue, &courses).await;
        let codes: Vec<_> = classes.iter().map(|c| c.course.code.as_str()).collect();
        assert_eq!(codes, vec!["MAT101", "BIL201"]);
        assert_eq!(classes[1].end_time, at(15));
        assert!(service.classes_on(user, Weekday::Sat, &courses).await.is_empty());
    }
}
