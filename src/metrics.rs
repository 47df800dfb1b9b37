//! Prometheus metrics.
//!
//! HTTP traffic is recorded by [`metrics_middleware`]; the `track_*` helpers
//! record domain events. With `OBSERVABILITY_ENABLED=false` (or `0`) no
//! recorder is installed and every macro below is a no-op.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};
use tracing::warn;

const HTTP_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];
const REPORT_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0];
const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| !(v.eq_ignore_ascii_case("false") || v == "0"))
            .unwrap_or(true)
    })
}

fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_owned()),
            HTTP_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full("report_job_duration_seconds".to_owned()),
            REPORT_BUCKETS,
        )?
        .install_recorder()
}

/// Installs the Prometheus recorder and its upkeep task.
///
/// Returns `None` when observability is disabled or the recorder could not
/// be installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let handle = install_recorder()
        .inspect_err(|e| warn!(error = %e, "Prometheus recorder not installed"))
        .ok()?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            ticker.tick().await;
            upkeep.run_upkeep();
        }
    });

    Some(handle)
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() / 100 {
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}

/// Keeps `http_requests_active` balanced even when the handler future is
/// dropped.
struct InFlight;

impl InFlight {
    fn enter() -> Self {
        gauge!("http_requests_active").increment(1.0);
        InFlight
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        gauge!("http_requests_active").decrement(1.0);
    }
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let method = req.method().as_str().to_owned();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());

    let _in_flight = InFlight::enter();
    let started = Instant::now();
    let response = next.run(req).await;
    let status = response.status();

    histogram!("http_request_duration_seconds", "method" => method.clone(), "path" => route.clone())
        .record(started.elapsed().as_secs_f64());
    counter!(
        "http_requests_total",
        "method" => method,
        "path" => route,
        "status" => status.as_u16().to_string(),
        "class" => status_class(status),
    )
    .increment(1);

    response
}

/// Router serving the Prometheus scrape endpoint.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_login_success() {
    counter!("logins_total", "outcome" => "success").increment(1);
}

pub fn track_login_failure(reason: &'static str) {
    counter!("logins_total", "outcome" => "failure", "reason" => reason).increment(1);
}

/// Accounts created through registration or demo provisioning.
pub fn track_user_registered(provisioned: bool) {
    let source = if provisioned { "demo" } else { "register" };
    counter!("users_created_total", "source" => source).increment(1);
}

pub fn track_session_issued() {
    counter!("session_tokens_issued_total").increment(1);
}

/// Attendance sessions recorded, by course code.
pub fn track_attendance_recorded(course_code: &str) {
    counter!("attendance_sessions_recorded_total", "course" => course_code.to_owned())
        .increment(1);
}

pub fn track_settings_saved() {
    counter!("settings_saves_total").increment(1);
}

pub fn track_report_job(status: &'static str) {
    counter!("report_jobs_total", "status" => status).increment(1);
}

pub fn track_report_duration(duration: Duration) {
    histogram!("report_job_duration_seconds").record(duration.as_secs_f64());
}
