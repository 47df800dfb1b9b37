//! Dashboard view model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::calendar::DayKind;
use crate::schedule::TodayClass;
use crate::settings::{ExamPeriod, Holiday, Semester};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub course_count: usize,
    pub student_count: u32,
    pub sessions_recorded: usize,
    /// Share of present or late records across all sessions, 0-100
    pub attendance_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub today_kind: DayKind,
    pub today_holiday: Option<String>,
    pub academic_year: String,
    pub current_semester: Option<Semester>,
    pub today_classes: Vec<TodayClass>,
    pub stats: DashboardStats,
    pub upcoming_holidays: Vec<Holiday>,
    pub upcoming_exam_periods: Vec<ExamPeriod>,
}

/// Optional reference date; the server's local date is used when absent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    pub date: Option<NaiveDate>,
}
