//! Report generation jobs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, ReportId, StudentId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    AttendanceSummary,
    AbsenteeList,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl ReportStatus {
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportDto {
    pub kind: ReportKind,
    /// Limit to one course; all courses when absent
    pub course_id: Option<CourseId>,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Absence percentage at or above which a student is listed (absentee list only)
    #[validate(range(min = 0.0, max = 100.0, message = "Eşik 0-100 arasında olmalıdır"))]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseAttendanceRow {
    pub course_id: CourseId,
    pub course_code: String,
    pub sessions: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    pub attendance_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AbsenteeRow {
    pub course_id: CourseId,
    pub course_code: String,
    pub student_id: StudentId,
    pub student_name: String,
    pub absences: usize,
    pub sessions: usize,
    pub absence_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    AttendanceSummary { rows: Vec<CourseAttendanceRow> },
    AbsenteeList { rows: Vec<AbsenteeRow> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportJob {
    pub id: ReportId,
    pub status: ReportStatus,
    pub request: CreateReportDto,
    pub result: Option<Report>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}
