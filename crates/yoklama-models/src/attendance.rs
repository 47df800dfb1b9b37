//! Attendance sessions: one per course and date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, StudentId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

impl AttendanceStatus {
    /// Late students count as attending.
    pub fn counts_as_present(self) -> bool {
        matches!(self, Self::Present | Self::Late)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub student_id: StudentId,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSession {
    pub course_id: CourseId,
    pub date: NaiveDate,
    pub records: Vec<AttendanceRecord>,
    pub recorded_by: UserId,
    pub recorded_at: DateTime<Utc>,
}

impl AttendanceSession {
    pub fn count(&self, status: AttendanceStatus) -> usize {
        self.records.iter().filter(|r| r.status == status).count()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            date: self.date,
            present: self.count(AttendanceStatus::Present),
            absent: self.count(AttendanceStatus::Absent),
            late: self.count(AttendanceStatus::Late),
            excused: self.count(AttendanceStatus::Excused),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RecordAttendanceDto {
    #[validate(length(min = 1, message = "En az bir öğrenci kaydı gereklidir"))]
    pub records: Vec<AttendanceRecord>,
}

/// Per-date counts for the course history view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub date: NaiveDate,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceHistory {
    pub course_id: CourseId,
    pub sessions: Vec<SessionSummary>,
    /// Share of present or late records, 0-100; `None` without sessions
    pub attendance_rate: Option<f64>,
}
