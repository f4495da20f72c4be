//! OpenTelemetry-based observability with file-based trace export.
//!
//! Spans and events emitted with `tracing` are bridged into OpenTelemetry and
//! written as OTLP JSON lines to a rotating file in the plugin data directory:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → bookfinder-otlp.json
//! ```
//!
//! The file rotates at 10MB and keeps 3 numbered backups
//! (`bookfinder-otlp.json.1` is the newest).
//!
//! # Configuration
//!
//! The filter comes from the `trace_level` plugin option (default `"info"`)
//! and accepts any `EnvFilter` directive, e.g. `"bookfinder=debug"`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
