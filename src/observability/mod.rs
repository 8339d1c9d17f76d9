//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - **File-Based Export**: `~/.local/share/zellij/pixgrid/pixgrid-otlp.json`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **OTLP Format**: One OTLP JSON document per exported batch
//!
//! The level comes from the `trace_level` plugin option (an `EnvFilter`
//! directive, default `"info"`).
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`tracer`]: Tracer provider with the file span exporter
//! - [`span_formatter`]: OTLP JSON span serialization
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
