//! Calendar view models: the month grid and single-day lookups.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::settings::{ExamPeriod, Holiday};

/// How a day is treated for attendance purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    School,
    Weekend,
    Holiday,
}

/// Short reference to an exam period, attached to grid cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExamPeriodRef {
    pub id: crate::ids::ExamPeriodId,
    pub name: String,
}

impl From<&ExamPeriod> for ExamPeriodRef {
    fn from(period: &ExamPeriod) -> Self {
        Self {
            id: period.id,
            name: period.name.clone(),
        }
    }
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub day_of_month: u32,
    pub classification: DayKind,
    pub is_today: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_period: Option<ExamPeriodRef>,
}

/// A calendar month, used for navigation links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

/// Six Monday-first weeks covering a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    /// Always 42 cells, row-major, Monday first
    pub cells: Vec<DayCell>,
    pub previous: YearMonth,
    pub next: YearMonth,
}

impl MonthGrid {
    /// Cells grouped by week.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    /// Defaults to the current year
    pub year: Option<i32>,
    /// 1-12, defaults to the current month
    pub month: Option<u32>,
}

/// Classification of a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayInfo {
    pub date: NaiveDate,
    pub classification: DayKind,
    pub holidays: Vec<Holiday>,
    pub exam_periods: Vec<ExamPeriod>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_cell_omits_empty_annotations() {
        let cell = DayCell {
            date: NaiveDate::from_ymd_opt(2024, 11, 4).unwrap(),
            is_current_month: true,
            day_of_month: 4,
            classification: DayKind::School,
            is_today: false,
            holiday_name: None,
            exam_period: None,
        };
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json["classification"], "school");
        assert_eq!(json["isCurrentMonth"], true);
        assert!(json.get("holidayName").is_none());
        assert!(json.get("examPeriod").is_none());
    }
}
