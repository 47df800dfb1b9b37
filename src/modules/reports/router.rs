use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_report, delete_report, get_report, list_reports};

pub fn init_reports_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reports).post(create_report))
        .route("/{id}", get(get_report).delete(delete_report))
}
