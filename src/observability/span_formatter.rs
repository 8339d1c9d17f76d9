//! OTLP JSON span formatter.
//!
//! Converts OpenTelemetry span data into OTLP JSON documents, one per exported
//! batch, so trace files can be loaded by standard OTLP tooling.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Formats batches of spans as OTLP JSON documents.
pub struct SpanFormatter {
    /// Resource metadata attached to every document (service name, etc.).
    resource: Resource,
    /// Instrumentation scope name of every span.
    scope_name: &'static str,
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope_name: &'static str) -> Self {
        Self {
            resource,
            scope_name,
        }
    }

    /// Formats a batch of spans as one OTLP JSON document.
    ///
    /// ```json
    /// {
    ///   "resourceSpans": [{
    ///     "resource": {
    ///       "attributes": [{"key": "service.name", "value": {"stringValue": "Pixgrid"}}]
    ///     },
    ///     "scopeSpans": [{
    ///       "scope": {"name": "Pixgrid"},
    ///       "spans": [...]
    ///     }]
    ///   }]
    /// }
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| json!({ "key": k.to_string(), "value": format_value(v) }))
            .collect();

        let spans_json: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": self.scope_name },
                    "spans": spans_json
                }]
            }]
        })
    }
}

/// Formats a single span: hex ids, nanosecond timestamps as strings, and the
/// OTLP integer status code (0 unset, 1 ok, 2 error).
fn format_span(span: &SpanData) -> JsonValue {
    let (status_code, status_message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent_span_id,
        "name": span.name,
        "kind": span_kind_code(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": format_attributes(&span.attributes),
        "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
        "status": { "code": status_code, "message": status_message },
    })
}

const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
        .to_string()
}

fn format_attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.to_string(), "value": format_value(&kv.value) }))
        .collect()
}

/// Maps an attribute value to its OTLP representation.
///
/// Integers are strings per the OTLP JSON mapping. Arrays fall back to their
/// display form as a string value.
fn format_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.to_string() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    }
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": format_attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": format_attributes(&link.attributes),
    })
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope_name", &self.scope_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(&Value::I64(42)), json!({ "intValue": "42" }));
        assert_eq!(format_value(&Value::Bool(true)), json!({ "boolValue": true }));
        assert_eq!(
            format_value(&Value::String("cats".into())),
            json!({ "stringValue": "cats" })
        );
    }

    #[test]
    fn test_format_empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "Pixgrid")]);
        let formatter = SpanFormatter::new(resource, "Pixgrid");

        let doc = formatter.format_batch(&[]);
        let group = &doc["resourceSpans"][0];
        let attrs = group["resource"]["attributes"].as_array().unwrap();

        assert!(attrs.iter().any(|attr| attr["key"] == "service.name"
            && attr["value"]["stringValue"] == "Pixgrid"));
        assert_eq!(group["scopeSpans"][0]["scope"]["name"], "Pixgrid");
        assert_eq!(group["scopeSpans"][0]["spans"], json!([]));
    }

    #[test]
    fn test_unix_nanos() {
        assert_eq!(unix_nanos(UNIX_EPOCH), "0");
        assert_eq!(
            unix_nanos(UNIX_EPOCH + std::time::Duration::from_millis(5)),
            "5000000"
        );
    }
}
