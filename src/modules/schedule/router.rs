use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{add_slot, get_grid, get_slots, get_today, remove_slot};

pub fn init_schedule_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_slots))
        .route("/grid", get(get_grid))
        .route("/today", get(get_today))
        .route("/slots", post(add_slot))
        .route("/slots/{day}/{start}", delete(remove_slot))
}
