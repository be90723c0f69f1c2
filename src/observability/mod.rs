//! OpenTelemetry-based observability with file-based span export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → JsonLinesExporter → file
//! ```
//!
//! Spans are written one JSON object per line to
//! `$GROOP_DATA_DIR/groop-traces.jsonl` (or `~/.local/share/groop/...`),
//! rotating at 5 MiB with two backups.
//!
//! # Configuration
//!
//! The filter comes from `Config::trace_level` (default `"info"`) and the
//! destination from `Config::trace_file`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: JSON-lines span exporter and tracer provider
//! - `file_writer`: Rotating line writer

mod exporter;
mod file_writer;
pub mod init;

pub use init::{init_tracing, SERVICE_NAME};
