use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{login_user, register_user, verify_session};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
        .route("/verify", get(verify_session))
}
