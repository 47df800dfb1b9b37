use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use opentelemetry::{KeyValue, global, trace::TraceError};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    propagation::TraceContextPropagator,
    runtime,
    trace::{RandomIdGenerator, Sampler, Tracer},
};
use opentelemetry_semantic_conventions::resource::{SERVICE_NAME, SERVICE_VERSION};
use std::time::Instant;
use tracing::{Instrument, debug, error, info, info_span, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Request log line emitted when the response is ready. Client errors are
/// warnings, server errors are errors.
fn log_completion(status: StatusCode, latency_ms: u128) {
    if status.is_server_error() {
        error!(status = status.as_u16(), latency_ms, "Server error");
    } else if status.is_client_error() {
        warn!(status = status.as_u16(), latency_ms, "Client error");
    } else {
        info!(status = status.as_u16(), latency_ms, "Request completed");
    }
}

/// Wraps each request in an `http_request` span carrying a generated request
/// id, the method and the matched route.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| req.uri().path().to_owned(), |p| p.as_str().to_owned());
    let span = info_span!(
        "http_request",
        request_id = %Uuid::new_v4(),
        method = %req.method(),
        route = %route,
    );

    async move {
        let started = Instant::now();
        debug!("Incoming request");
        let response = next.run(req).await;
        log_completion(response.status(), started.elapsed().as_millis());
        response
    }
    .instrument(span)
    .await
}

const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";
const LOG_DIR: &str = "storage/logs";

fn init_tracer() -> Result<Tracer, TraceError> {
    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| DEFAULT_OTLP_ENDPOINT.to_owned());

    global::set_text_map_propagator(TraceContextPropagator::new());

    let deployment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_owned());
    let trace_config = opentelemetry_sdk::trace::Config::default()
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(Resource::new([
            KeyValue::new(SERVICE_NAME, "yoklama"),
            KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
            KeyValue::new("deployment.environment", deployment),
        ]));

    opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint(endpoint),
        )
        .with_trace_config(trace_config)
        .install_batch(runtime::Tokio)
}

fn otel_enabled() -> bool {
    std::env::var("OTEL_ENABLED")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

/// Installs the global subscriber: a compact console layer, a daily error
/// log and a daily JSON log under `storage/logs`, plus OTLP export when
/// `OTEL_ENABLED=true`.
pub fn init_tracing() {
    use std::fs;
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::fmt;

    let file_logging = fs::create_dir_all(LOG_DIR)
        .inspect_err(|e| eprintln!("Cannot create {}: {}; logging to console only", LOG_DIR, e))
        .is_ok();

    let console_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}=info,tower_http=warn,hyper=info,tonic=info",
            env!("CARGO_CRATE_NAME")
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_filter(console_filter);

    let file_layer = file_logging.then(|| {
        fmt::layer()
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "yoklama.log"))
            .with_filter(EnvFilter::new("warn"))
    });

    let json_layer = file_logging.then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(RollingFileAppender::new(Rotation::DAILY, LOG_DIR, "yoklama.json"))
            .with_filter(EnvFilter::new("info"))
    });

    let tracer = otel_enabled()
        .then(|| {
            init_tracer()
                .inspect_err(|e| eprintln!("OpenTelemetry disabled: {}", e))
                .ok()
        })
        .flatten();
    let exporting = tracer.is_some();
    let otel_layer = tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(json_layer)
        .with(otel_layer)
        .init();

    info!(otlp = exporting, file_logging, "Tracing initialized");
}

/// Flushes pending spans. Safe to call when no exporter was installed.
pub fn shutdown_tracer() {
    if otel_enabled() {
        global::shutdown_tracer_provider();
    }
}
