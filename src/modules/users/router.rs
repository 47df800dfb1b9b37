use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{change_password, get_me, update_me};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/me/password", put(change_password))
}
