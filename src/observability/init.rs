//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros through `tracing-opentelemetry` into the file
//! exporter from [`super::tracer`].

use super::tracer;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name reported with every span.
const SERVICE_NAME: &str = "Pixgrid";

/// Filter used when `trace_level` is not configured.
const DEFAULT_LEVEL: &str = "info";

/// Builds the `EnvFilter` directive from the configured trace level.
fn filter_directive(config: &Config) -> String {
    config
        .trace_level
        .as_deref()
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
        .to_string()
}

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// Spans are written to `~/.local/share/zellij/pixgrid/pixgrid-otlp.json` on
/// the host (`/host/...` inside the sandbox). If the data directory cannot be
/// created, tracing stays disabled and the plugin runs normally. Only the first
/// call installs a subscriber.
///
/// ```rust,no_run
/// use pixgrid::observability::init_tracing;
/// use pixgrid::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider =
        tracer::create_tracer_provider(paths::trace_file_path(), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive(config)))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
