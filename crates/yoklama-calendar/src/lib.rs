//! # Yoklama Calendar
//!
//! Pure calendar logic shared by the API server and the CLI:
//!
//! - [`grid`]: the Monday-first 6×7 month grid and day classification
//! - [`schedule`]: weekly schedule slots with an explicit occupancy map
//! - [`academic`]: semester and holiday queries over [`AcademicSettings`]
//!
//! Nothing here performs I/O; callers pass in `today` and the settings.
//!
//! [`AcademicSettings`]: yoklama_models::settings::AcademicSettings

pub mod academic;
pub mod grid;
pub mod schedule;

pub use grid::{
    GRID_CELLS, HolidayLookup, annotate_exam_periods, build_month_grid, classify, holiday_lookup,
    shift_month,
};
pub use schedule::{ScheduleError, TimeGrid, WeeklySchedule};
