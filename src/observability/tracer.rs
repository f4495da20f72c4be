//! Tracer provider backed by a span exporter that writes to a rotating file.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// File-based OpenTelemetry span exporter.
///
/// Implements `SpanExporter` by formatting each batch as a complete OTLP JSON
/// document and appending it as one line to a rotating file.
#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    /// Creates an exporter writing to `file_path`.
    ///
    /// # Parameters
    ///
    /// * `file_path` - Path to the JSON trace file (created on first export)
    /// * `resource` - Resource metadata written into every batch
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn export_now(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("exporter is shut down"));
        }

        let line = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    /// Exports a batch of spans to the file.
    ///
    /// The write happens before the returned future is created, so the future
    /// is already complete when the simple span processor polls it.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the line was written
    /// - `Err(TraceError)` if the exporter is shut down or the write fails
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.export_now(&batch);
        Box::pin(std::future::ready(result))
    }

    /// Rejects all further exports. The file handle is closed on drop.
    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.formatter = SpanFormatter::new(resource.clone());
    }
}

/// Creates a tracer provider with file-based export.
///
/// Every finished span is exported immediately. The WASM sandbox has no
/// background runtime, so the simple (synchronous) exporter is used instead
/// of a batch processor.
///
/// # Parameters
///
/// * `file_path` - Path to the JSON trace file
/// * `resource` - OpenTelemetry resource metadata (service name)
///
/// # Returns
///
/// A configured `TracerProvider` ready for use with `tracing-opentelemetry`.
///
/// # Example
///
/// ```rust,ignore
/// use opentelemetry::KeyValue;
/// use opentelemetry_sdk::resource::Resource;
/// use std::path::PathBuf;
///
/// let resource = Resource::new(vec![KeyValue::new("service.name", "Bookfinder")]);
/// let provider = create_tracer_provider(PathBuf::from("/data/bookfinder-otlp.json"), resource);
/// ```
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
