//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace export inside the data directory.
pub const TRACE_FILE_NAME: &str = "bookfinder-otlp.json";

/// Service name attached to every exported batch.
pub const SERVICE_NAME: &str = "Bookfinder";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Best-effort: when persistence is disabled (blank `data_dir`) or the
/// directory cannot be created, tracing stays uninitialized and the `tracing`
/// macros become no-ops. Only the first successful call installs a global
/// subscriber; later calls are ignored.
///
/// # Example
///
/// ```rust
/// use bookfinder::observability::init_tracing;
/// use bookfinder::Config;
///
/// let config = Config {
///     data_dir: String::new(),
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("no-op without a data directory");
/// ```
pub fn init_tracing(config: &Config) {
    let Some(data_dir) = config.resolved_data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(&config.trace_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
