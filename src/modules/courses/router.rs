use axum::{Router, routing::get};

use crate::modules::attendance::controller::{
    get_attendance, get_attendance_history, record_attendance,
};
use crate::state::AppState;

use super::controller::{get_course, get_course_students, get_courses};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_courses))
        .route("/{id}", get(get_course))
        .route("/{id}/students", get(get_course_students))
        .route("/{id}/attendance", get(get_attendance_history))
        .route(
            "/{id}/attendance/{date}",
            get(get_attendance).put(record_attendance),
        )
}
