//! Weekly schedule bookkeeping.
//!
//! Slots are stored by `(day, start)`. Every hourly row a slot spans is
//! recorded in an occupancy map pointing at the owning [`SlotId`], so a row
//! is rendered as covered only when a slot that started earlier owns it.
//! The same course may therefore appear several times on one day.

use std::collections::{BTreeMap, HashMap};

use chrono::{NaiveTime, Timelike};
use thiserror::Error;
use yoklama_models::ids::{CourseId, SlotId};
use yoklama_models::schedule::{GridCell, GridRow, ScheduleGrid, ScheduleSlot, SchoolDay};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("Ders süresi en az 1 saat olmalıdır")]
    InvalidDuration,
    #[error("Başlangıç saati ders saatleriyle uyumlu değil: {}", .0.format("%H:%M"))]
    OffGrid(NaiveTime),
    #[error("Ders, günün son ders saatini aşıyor")]
    PastEndOfDay,
    #[error("{} {} saatinde başka bir ders var", .day.label(), .at.format("%H:%M"))]
    Overlap {
        day: SchoolDay,
        at: NaiveTime,
        slot: SlotId,
    },
    #[error("{} {} saatinde ders bulunamadı", .day.label(), .start.format("%H:%M"))]
    NotFound { day: SchoolDay, start: NaiveTime },
}

/// Hourly rows `first_hour:00` up to but excluding `last_hour:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    first_hour: u32,
    last_hour: u32,
}

impl TimeGrid {
    /// Hours are clamped to 0-24 and `last_hour` is kept after `first_hour`.
    pub fn new(first_hour: u32, last_hour: u32) -> Self {
        let first_hour = first_hour.min(23);
        let last_hour = last_hour.clamp(first_hour + 1, 24);
        Self {
            first_hour,
            last_hour,
        }
    }

    pub fn len(&self) -> usize {
        (self.last_hour - self.first_hour) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn rows(&self) -> impl Iterator<Item = NaiveTime> + '_ {
        (self.first_hour..self.last_hour).filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
    }

    /// Row index of `time`, `None` unless it is a whole hour on the grid.
    pub fn row_index(&self, time: NaiveTime) -> Option<usize> {
        if time.minute() != 0 || time.second() != 0 || time.nanosecond() != 0 {
            return None;
        }
        let hour = time.hour();
        (self.first_hour..self.last_hour)
            .contains(&hour)
            .then(|| (hour - self.first_hour) as usize)
    }

    fn row_time(&self, index: usize) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.first_hour + index as u32, 0, 0)
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self::new(8, 18)
    }
}

/// One teacher's week.
#[derive(Debug, Clone, Default)]
pub struct WeeklySchedule {
    grid: TimeGrid,
    slots: BTreeMap<(SchoolDay, NaiveTime), ScheduleSlot>,
    occupancy: HashMap<(SchoolDay, NaiveTime), SlotId>,
}

impl WeeklySchedule {
    pub fn new(grid: TimeGrid) -> Self {
        Self {
            grid,
            slots: BTreeMap::new(),
            occupancy: HashMap::new(),
        }
    }

    pub fn time_grid(&self) -> TimeGrid {
        self.grid
    }

    /// Inserts the slot at `(day, start)`, replacing any slot already
    /// starting there. The replaced slot keeps its id.
    pub fn add_slot(
        &mut self,
        day: SchoolDay,
        start: NaiveTime,
        course_id: CourseId,
        duration_hours: u32,
    ) -> Result<&ScheduleSlot, ScheduleError> {
        if duration_hours == 0 {
            return Err(ScheduleError::InvalidDuration);
        }
        let first_row = self
            .grid
            .row_index(start)
            .ok_or(ScheduleError::OffGrid(start))?;
        if first_row + duration_hours as usize > self.grid.len() {
            return Err(ScheduleError::PastEndOfDay);
        }

        let replaced = self.slots.get(&(day, start)).map(|s| s.id);
        let span = self.span(first_row, duration_hours);

        let conflict = span.iter().find_map(|at| {
            self.occupancy
                .get(&(day, *at))
                .filter(|owner| Some(**owner) != replaced)
                .map(|owner| (*at, *owner))
        });
        if let Some((at, slot)) = conflict {
            return Err(ScheduleError::Overlap { day, at, slot });
        }

        if let Some(old) = self.slots.remove(&(day, start)) {
            self.release(&old);
        }

        let id = replaced.unwrap_or_default();
        for at in span {
            self.occupancy.insert((day, at), id);
        }
        let slot = self.slots.entry((day, start)).or_insert(ScheduleSlot {
            id,
            day,
            start_time: start,
            course_id,
            duration_hours,
        });
        Ok(slot)
    }

    pub fn remove_slot(
        &mut self,
        day: SchoolDay,
        start: NaiveTime,
    ) -> Result<ScheduleSlot, ScheduleError> {
        let slot = self
            .slots
            .remove(&(day, start))
            .ok_or(ScheduleError::NotFound { day, start })?;
        self.release(&slot);
        Ok(slot)
    }

    /// Slot occupying `(day, time)`, whether it starts there or earlier.
    pub fn owner_at(&self, day: SchoolDay, time: NaiveTime) -> Option<SlotId> {
        self.occupancy.get(&(day, time)).copied()
    }

    /// All slots ordered by day, then start time.
    pub fn slots(&self) -> impl Iterator<Item = &ScheduleSlot> {
        self.slots.values()
    }

    pub fn slots_on(&self, day: SchoolDay) -> impl Iterator<Item = &ScheduleSlot> {
        self.slots.values().filter(move |s| s.day == day)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Week view: one row per grid hour, one column per school day.
    pub fn render(&self) -> ScheduleGrid {
        let rows = self
            .grid
            .rows()
            .map(|time| GridRow {
                time,
                cells: SchoolDay::ALL
                    .iter()
                    .map(|&day| self.cell_at(day, time))
                    .collect(),
            })
            .collect();

        ScheduleGrid {
            days: SchoolDay::ALL.to_vec(),
            rows,
        }
    }

    fn cell_at(&self, day: SchoolDay, time: NaiveTime) -> GridCell {
        let Some(owner) = self.owner_at(day, time) else {
            return GridCell::Empty;
        };
        match self.slots.get(&(day, time)) {
            Some(slot) if slot.id == owner => GridCell::Start {
                slot_id: slot.id,
                course_id: slot.course_id,
                row_span: slot.duration_hours,
            },
            _ => GridCell::Covered { slot_id: owner },
        }
    }

    fn span(&self, first_row: usize, duration_hours: u32) -> Vec<NaiveTime> {
        (first_row..first_row + duration_hours as usize)
            .filter_map(|row| self.grid.row_time(row))
            .collect()
    }

    fn release(&mut self, slot: &ScheduleSlot) {
        self.occupancy
            .retain(|(day, _), owner| !(*day == slot.day && *owner == slot.id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, 0, 0).unwrap()
    }

    fn row(hour: u32) -> usize {
        (hour - 8) as usize
    }

    #[test]
    fn test_default_grid_has_ten_rows() {
        let grid = TimeGrid::default();
        assert_eq!(grid.len(), 10);
        assert_eq!(grid.rows().next(), Some(at(8)));
        assert_eq!(grid.rows().last(), Some(at(17)));
        assert_eq!(grid.row_index(at(18)), None);
        assert_eq!(grid.row_index(NaiveTime::from_hms_opt(9, 30, 0).unwrap()), None);
    }

    #[test]
    fn test_add_and_render_span() {
        let mut schedule = WeeklySchedule::default();
        let id = schedule
            .add_slot(SchoolDay::Monday, at(9), CourseId(1), 2)
            .unwrap()
            .id;

        let grid = schedule.render();
        assert_eq!(grid.rows.len(), 10);
        assert_eq!(
            grid.cell(row(9), SchoolDay::Monday),
            Some(&GridCell::Start {
                slot_id: id,
                course_id: CourseId(1),
                row_span: 2
            })
        );
        assert_eq!(
            grid.cell(row(10), SchoolDay::Monday),
            Some(&GridCell::Covered { slot_id: id })
        );
        assert_eq!(grid.cell(row(11), SchoolDay::Monday), Some(&GridCell::Empty));
        assert_eq!(grid.cell(row(9), SchoolDay::Tuesday), Some(&GridCell::Empty));
    }

    #[test]
    fn test_same_course_twice_in_one_day() {
        let mut schedule = WeeklySchedule::default();
        let morning = schedule
            .add_slot(SchoolDay::Wednesday, at(8), CourseId(3), 2)
            .unwrap()
            .id;
        let afternoon = schedule
            .add_slot(SchoolDay::Wednesday, at(13), CourseId(3), 2)
            .unwrap()
            .id;
        assert_ne!(morning, afternoon);

        let grid = schedule.render();
        let day = SchoolDay::Wednesday;
        assert!(matches!(grid.cell(row(8), day), Some(GridCell::Start { slot_id, .. }) if *slot_id == morning));
        assert_eq!(grid.cell(row(9), day), Some(&GridCell::Covered { slot_id: morning }));
        assert_eq!(grid.cell(row(10), day), Some(&GridCell::Empty));
        assert!(matches!(grid.cell(row(13), day), Some(GridCell::Start { slot_id, .. }) if *slot_id == afternoon));
        assert_eq!(grid.cell(row(14), day), Some(&GridCell::Covered { slot_id: afternoon }));
    }

    #[test]
    fn test_adjacent_slots_do_not_overlap() {
        let mut schedule = WeeklySchedule::default();
        schedule.add_slot(SchoolDay::Friday, at(10), CourseId(1), 2).unwrap();
        schedule.add_slot(SchoolDay::Friday, at(12), CourseId(2), 1).unwrap();
        assert_eq!(schedule.slots_on(SchoolDay::Friday).count(), 2);
    }

    #[test]
    fn test_overlap_is_rejected() {
        let mut schedule = WeeklySchedule::default();
        let first = schedule
            .add_slot(SchoolDay::Monday, at(9), CourseId(1), 3)
            .unwrap()
            .id;

        let err = schedule
            .add_slot(SchoolDay::Monday, at(10), CourseId(2), 1)
            .unwrap_err();
        assert_eq!(
            err,
            ScheduleError::Overlap {
                day: SchoolDay::Monday,
                at: at(10),
                slot: first
            }
        );

        let err = schedule
            .add_slot(SchoolDay::Monday, at(8), CourseId(2), 2)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::Overlap { .. }));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn test_overwrite_same_start_keeps_id() {
        let mut schedule = WeeklySchedule::default();
        let id = schedule
            .add_slot(SchoolDay::Tuesday, at(9), CourseId(1), 3)
            .unwrap()
            .id;
        let replaced = schedule
            .add_slot(SchoolDay::Tuesday, at(9), CourseId(2), 1)
            .unwrap()
            .clone();

        assert_eq!(replaced.id, id);
        assert_eq!(replaced.course_id, CourseId(2));
        assert_eq!(schedule.owner_at(SchoolDay::Tuesday, at(10)), None);
        assert_eq!(schedule.owner_at(SchoolDay::Tuesday, at(9)), Some(id));
    }

    #[test]
    fn test_invalid_slots_are_rejected() {
        let mut schedule = WeeklySchedule::default();
        assert_eq!(
            schedule.add_slot(SchoolDay::Monday, at(9), CourseId(1), 0),
            Err(ScheduleError::InvalidDuration)
        );
        assert_eq!(
            schedule.add_slot(SchoolDay::Monday, at(7), CourseId(1), 1),
            Err(ScheduleError::OffGrid(at(7)))
        );
        assert_eq!(
            schedule.add_slot(SchoolDay::Monday, at(16), CourseId(1), 3),
            Err(ScheduleError::PastEndOfDay)
        );
        assert!(schedule.add_slot(SchoolDay::Monday, at(16), CourseId(1), 2).is_ok());
    }

    #[test]
    fn test_remove_releases_rows() {
        let mut schedule = WeeklySchedule::default();
        schedule.add_slot(SchoolDay::Thursday, at(14), CourseId(4), 2).unwrap();
        let removed = schedule.remove_slot(SchoolDay::Thursday, at(14)).unwrap();
        assert_eq!(removed.course_id, CourseId(4));
        assert_eq!(schedule.owner_at(SchoolDay::Thursday, at(15)), None);
        assert!(schedule.is_empty());
        assert_eq!(
            schedule.remove_slot(SchoolDay::Thursday, at(14)),
            Err(ScheduleError::NotFound {
                day: SchoolDay::Thursday,
                start: at(14)
            })
        );
    }
}
