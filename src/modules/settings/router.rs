use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::state::AppState;

use super::controller::{
    add_exam_period, add_holiday, get_settings, load_settings, remove_exam_period,
    remove_holiday, reset_settings, save_settings, update_settings,
};

pub fn init_settings_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .route("/save", post(save_settings))
        .route("/load", post(load_settings))
        .route("/reset", post(reset_settings))
        .route("/holidays", post(add_holiday))
        .route("/holidays/{id}", delete(remove_holiday))
        .route("/exam-periods", post(add_exam_period))
        .route("/exam-periods/{id}", delete(remove_exam_period))
}
