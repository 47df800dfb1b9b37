//! # Yoklama Models
//!
//! Domain models and DTOs for the Yoklama API.
//!
//! All wire types serialize with camelCase field names; the persisted
//! academic settings document uses the same shape.
//!
//! # Modules
//!
//! - [`settings`]: Academic year, semesters, holidays and exam periods
//! - [`calendar`]: Month grid and day classification view models
//! - [`schedule`]: Weekly schedule slots and the week-view grid
//! - [`courses`]: Course catalog and rosters
//! - [`attendance`]: Attendance sessions
//! - [`reports`]: Report jobs
//! - [`auth`] and [`users`]: Login, registration and teacher profiles

pub mod attendance;
pub mod auth;
pub mod calendar;
pub mod courses;
pub mod dashboard;
pub mod ids;
pub mod reports;
pub mod schedule;
pub mod settings;
pub mod users;

pub use auth::{Claims, LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
pub use calendar::{DayCell, DayKind, MonthGrid};
pub use courses::{Course, CourseWithRoster, Student};
pub use schedule::{SchoolDay, ScheduleSlot};
pub use settings::{AcademicSettings, ExamPeriod, Holiday, HolidayType, Semester, SemesterDates};
pub use users::{User, UserProfile};
