//! Tracer provider backed by a file span exporter.
//!
//! Zellij plugins run sandboxed without a collector to talk to, so spans are
//! exported as OTLP JSON lines into a rotating file instead of over the network.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Writes each exported batch as one OTLP JSON line.
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    /// Set by `shutdown`; later exports fail.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    const fn new(file_path: PathBuf, resource: Resource, scope_name: &'static str) -> Self {
        Self {
            writer: FileWriter::new(file_path),
            formatter: SpanFormatter::new(resource, scope_name),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
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
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = self.write_batch(&batch);
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    // The resource is fixed at construction.
    fn set_resource(&mut self, _res: &Resource) {}
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Creates a tracer provider exporting spans to `file_path`.
///
/// Uses the simple (immediate, non-batched) export strategy; the plugin is
/// single-threaded and has no runtime to drive a batch processor.
pub fn create_tracer_provider(
    file_path: PathBuf,
    resource: Resource,
    scope_name: &'static str,
) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone(), scope_name);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn test_spans_are_written_as_otlp_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixgrid-otlp.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "Pixgrid")]);

        let provider = create_tracer_provider(path.clone(), resource, "Pixgrid");
        provider.tracer("Pixgrid").in_span("submit_query", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let first: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let span = &first["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(span["name"], "submit_query");
    }

    #[test]
    fn test_export_after_shutdown_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut exporter = FileSpanExporter::new(
            dir.path().join("trace.json"),
            Resource::empty(),
            "Pixgrid",
        );
        exporter.shutdown();

        assert!(exporter.write_batch(&[]).is_err());
    }
}
