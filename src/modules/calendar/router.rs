use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_day, get_month};

pub fn init_calendar_router() -> Router<AppState> {
    Router::new()
        .route("/month", get(get_month))
        .route("/day/{date}", get(get_day))
}
