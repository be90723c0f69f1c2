//! Tracing initialization and subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::exporter;
use crate::Config;

/// Service name recorded on every exported span.
pub const SERVICE_NAME: &str = "groop-core";

/// Default trace file name inside the data directory.
const TRACE_FILE_NAME: &str = "groop-traces.jsonl";

/// Installs the global tracing subscriber.
///
/// The subscriber filters with `config.trace_level` (default `"info"`) and
/// exports spans through OpenTelemetry to `config.trace_file`, or to
/// `groop-traces.jsonl` in the data directory.
///
/// Idempotent: only the first call in a process takes effect. Skips silently
/// when the trace directory cannot be created.
///
/// # Example
///
/// ```no_run
/// use groop_core::{observability::init_tracing, Config};
///
/// init_tracing(&Config { trace_level: Some("debug".into()), ..Default::default() });
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let trace_file = config
        .trace_file
        .clone()
        .unwrap_or_else(|| crate::infrastructure::get_data_dir().join(TRACE_FILE_NAME));
    if let Some(parent) = trace_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }

    let provider = exporter::create_tracer_provider(trace_file, SERVICE_NAME);
    let tracer = provider.tracer(SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(tracer);

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
