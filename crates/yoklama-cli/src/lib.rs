//! # Yoklama CLI
//!
//! Maintenance commands that work directly on the document store used by
//! the server.
//!
//! - [`settings`]: show, reset, export and import the academic settings
//! - [`calendar_view`]: plain-text rendering of a month grid
//! - [`seeder`]: course catalogs with generated rosters

pub mod calendar_view;
pub mod seeder;
pub mod settings;
