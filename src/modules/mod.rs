pub mod attendance;
pub mod auth;
pub mod calendar;
pub mod courses;
pub mod dashboard;
pub mod reports;
pub mod schedule;
pub mod settings;
pub mod users;
