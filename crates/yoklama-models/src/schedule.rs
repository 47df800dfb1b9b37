//! Weekly schedule models.
//!
//! A slot is keyed by `(day, start_time)` and spans `duration_hours` hourly
//! rows of the week view.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;
use yoklama_core::serde::hhmm;

use crate::courses::Course;
use crate::ids::{CourseId, SlotId};

/// A teaching day. Weekends have no schedule.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SchoolDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl SchoolDay {
    pub const ALL: [SchoolDay; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(Self::Monday),
            Weekday::Tue => Some(Self::Tuesday),
            Weekday::Wed => Some(Self::Wednesday),
            Weekday::Thu => Some(Self::Thursday),
            Weekday::Fri => Some(Self::Friday),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Monday => "Pazartesi",
            Self::Tuesday => "Salı",
            Self::Wednesday => "Çarşamba",
            Self::Thursday => "Perşembe",
            Self::Friday => "Cuma",
        }
    }
}

impl fmt::Display for SchoolDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchoolDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("'{}' is not a school day", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: SlotId,
    pub day: SchoolDay,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    pub course_id: CourseId,
    pub duration_hours: u32,
}

impl ScheduleSlot {
    /// Exclusive end of the slot.
    pub fn end_time(&self) -> NaiveTime {
        self.start_time + chrono::Duration::hours(i64::from(self.duration_hours))
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotDto {
    pub day: SchoolDay,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    pub course_id: CourseId,
    #[validate(range(min = 1, max = 10, message = "Ders süresi 1-10 saat olmalıdır"))]
    pub duration_hours: u32,
}

/// One cell of the week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GridCell {
    Empty,
    /// First row of a slot; spans `row_span` rows
    #[serde(rename_all = "camelCase")]
    Start {
        slot_id: SlotId,
        course_id: CourseId,
        row_span: u32,
    },
    /// Row owned by a slot that started earlier
    #[serde(rename_all = "camelCase")]
    Covered { slot_id: SlotId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GridRow {
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "08:00")]
    pub time: NaiveTime,
    /// One cell per school day, Monday first
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleGrid {
    pub days: Vec<SchoolDay>,
    pub rows: Vec<GridRow>,
}

impl ScheduleGrid {
    pub fn cell(&self, row: usize, day: SchoolDay) -> Option<&GridCell> {
        let column = SchoolDay::ALL.iter().position(|d| *d == day)?;
        self.rows.get(row)?.cells.get(column)
    }
}

/// Grid together with the courses it references.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScheduleGridResponse {
    #[serde(flatten)]
    pub grid: ScheduleGrid,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TodayClass {
    pub slot_id: SlotId,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "11:00")]
    pub end_time: NaiveTime,
    pub course: Course,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_wire_format() {
        let slot = ScheduleSlot {
            id: SlotId::new(),
            day: SchoolDay::Tuesday,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            course_id: CourseId(2),
            duration_hours: 2,
        };
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["day"], "tuesday");
        assert_eq!(json["startTime"], "10:00");
        assert_eq!(json["durationHours"], 2);
        assert_eq!(slot.end_time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
    }

    #[test]
    fn test_grid_cell_is_tagged() {
        let json = serde_json::to_value(GridCell::Empty).unwrap();
        assert_eq!(json["kind"], "empty");

        let json = serde_json::to_value(GridCell::Start {
            slot_id: SlotId::new(),
            course_id: CourseId(1),
            row_span: 3,
        })
        .unwrap();
        assert_eq!(json["kind"], "start");
        assert_eq!(json["rowSpan"], 3);
    }

    #[test]
    fn test_school_day_parsing() {
        assert_eq!("Friday".parse::<SchoolDay>().unwrap(), SchoolDay::Friday);
        assert!("saturday".parse::<SchoolDay>().is_err());
        assert_eq!(SchoolDay::from_weekday(Weekday::Sun), None);
    }

    #[test]
    fn test_duration_is_validated() {
        let dto = CreateSlotDto {
            day: SchoolDay::Monday,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            course_id: CourseId(1),
            duration_hours: 0,
        };
        assert!(dto.validate().is_err());
    }
}
