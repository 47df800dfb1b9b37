//! # Yoklama API
//!
//! Attendance tracking service for university teachers.
//!
//! ## Overview
//!
//! - **Academic calendar**: a Monday-first 6×7 month grid where each day is a
//!   school day, a weekend or a holiday, with exam periods marked
//! - **Settings**: academic year, semester dates, holidays and exam periods,
//!   edited on a working copy and persisted to a JSON document store
//! - **Weekly schedule**: hour-aligned slots per school day with overlap
//!   detection and a row-spanning grid view
//! - **Attendance**: one session per course and date, checked against the
//!   calendar and the course roster
//! - **Reports**: background jobs that can be polled or cancelled
//! - **Demo authentication**: session tokens (HS256 JWT); unknown emails are
//!   provisioned as teachers when demo mode is on
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # AuthUser extractor
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Login, registration, token check
//! │   ├── users/        # Profile and password
//! │   ├── settings/     # Academic settings document
//! │   ├── calendar/     # Month grid and day lookups
//! │   ├── courses/      # Course catalog and rosters
//! │   ├── attendance/   # Attendance sessions
//! │   ├── schedule/     # Weekly slot editor
//! │   ├── reports/      # Report jobs
//! │   └── dashboard/    # Landing page summary
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Subscriber setup and request logging
//! ├── metrics.rs        # Prometheus recorder and domain counters
//! ├── router.rs         # Route tree and layers
//! ├── state.rs          # Shared application state
//! └── validator.rs      # ValidatedJson extractor
//! ```
//!
//! Each feature module has a `controller.rs` (handlers), `service.rs`
//! (logic), `model.rs` (re-exported types from `yoklama-models`) and, where
//! it owns routes, a `router.rs`.
//!
//! Calendar and schedule algorithms live in `yoklama-calendar` so that the
//! CLI can use them without the HTTP stack.
//!
//! ## API Documentation
//!
//! - Swagger UI: `/swagger-ui`
//! - Scalar: `/scalar`
//! - OpenAPI JSON: `/api-docs/openapi.json`

pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;
