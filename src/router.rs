use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::modules::auth::init_auth_router;
use crate::modules::calendar::init_calendar_router;
use crate::modules::courses::init_courses_router;
use crate::modules::dashboard::init_dashboard_router;
use crate::modules::reports::init_reports_router;
use crate::modules::schedule::init_schedule_router;
use crate::modules::settings::init_settings_router;
use crate::modules::users::init_users_router;
use crate::state::AppState;

fn auth_router(state: &AppState) -> Router<AppState> {
    let router = init_auth_router();
    match state.rate_limit_config.auth_governor_config() {
        Some(config) => router.layer(GovernorLayer::new(Arc::new(config))),
        None => router,
    }
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Full route tree. Layers run outermost first: request logging, metrics,
/// then CORS.
pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", auth_router(&state))
                .nest("/users", init_users_router())
                .nest("/settings", init_settings_router())
                .nest("/calendar", init_calendar_router())
                .nest("/courses", init_courses_router())
                .nest("/schedule", init_schedule_router())
                .nest("/reports", init_reports_router())
                .nest("/dashboard", init_dashboard_router()),
        )
        .with_state(state.clone())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(middleware::from_fn(metrics_middleware))
                .layer(cors_layer(&state)),
        )
}
