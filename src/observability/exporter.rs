//! Span exporter writing one JSON object per finished span.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime};

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};

use super::file_writer::LineWriter;

/// Writes spans as JSON lines.
///
/// Lines are flat objects rather than OTLP batches so they can be grepped and
/// piped through `jq` one span at a time.
pub struct JsonLinesExporter {
    writer: LineWriter,
    service: String,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    pub fn new(path: PathBuf, service: impl Into<String>) -> Self {
        Self {
            writer: LineWriter::new(path),
            service: service.into(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn span_to_json(&self, span: &SpanData) -> JsonValue {
        let parent = (span.parent_span_id != SpanId::INVALID).then(|| format!("{:016x}", span.parent_span_id));
        let duration = span
            .end_time
            .duration_since(span.start_time)
            .unwrap_or(Duration::ZERO);
        let (status, status_message) = match &span.status {
            Status::Unset => ("unset", String::new()),
            Status::Ok => ("ok", String::new()),
            Status::Error { description } => ("error", description.to_string()),
        };
        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "attributes": attributes_to_json(&event.attributes),
                })
            })
            .collect();

        json!({
            "service": self.service,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "name": span.name,
            "startUnixNano": unix_nanos(span.start_time).to_string(),
            "durationMicros": u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
            "attributes": attributes_to_json(&span.attributes),
            "events": events,
            "status": status,
            "statusMessage": status_message,
        })
    }
}

fn unix_nanos(time: SystemTime) -> u128 {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
}

fn attributes_to_json(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| {
            let value = match &kv.value {
                Value::Bool(b) => JsonValue::from(*b),
                Value::I64(i) => JsonValue::from(*i),
                Value::F64(f) => JsonValue::from(*f),
                other => JsonValue::from(other.to_string()),
            };
            (kv.key.as_str().to_string(), value)
        })
        .collect();
    JsonValue::Object(map)
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("exporter is shut down"))));
        }

        let result = batch
            .iter()
            .try_for_each(|span| self.writer.write_line(&self.span_to_json(span).to_string()))
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for JsonLinesExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLinesExporter")
            .field("writer", &self.writer)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a tracer provider exporting every finished span to `path`.
///
/// Uses the simple (unbatched) span processor, so a span is on disk as soon
/// as it closes.
pub fn create_tracer_provider(path: PathBuf, service: &str) -> TracerProvider {
    let resource = Resource::new(vec![KeyValue::new("service.name", service.to_string())]);
    let exporter = JsonLinesExporter::new(path, service);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use opentelemetry::trace::{Span as _, Tracer as _, TracerProvider as _};

    use super::*;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("groop-traces.jsonl");
        let provider = create_tracer_provider(path.clone(), "groop-core");
        let tracer = provider.tracer("test");

        let mut span = tracer.start("aggregate");
        span.set_attribute(KeyValue::new("groops", 3_i64));
        span.set_attribute(KeyValue::new("display_name", "Taylor"));
        span.end();

        let contents = std::fs::read_to_string(&path).unwrap();
        let line: JsonValue = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(line["name"], "aggregate");
        assert_eq!(line["service"], "groop-core");
        assert_eq!(line["attributes"]["groops"], 3);
        assert_eq!(line["attributes"]["display_name"], "Taylor");
        assert_eq!(line["parentSpanId"], JsonValue::Null);
    }

    #[test]
    fn export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = JsonLinesExporter::new(dir.path().join("t.jsonl"), "groop-core");
        exporter.shutdown();
        let result = futures_util::FutureExt::now_or_never(exporter.export(Vec::new()));
        assert!(matches!(result, Some(Err(_))));
    }
}
