//! Serializes finished spans as OTLP JSON, one batch per document.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;
use std::time::SystemTime;

/// Instrumentation scope written into every batch.
const SCOPE_NAME: &str = "SafeNet";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceDocument {
    resource_spans: Vec<ResourceSpans>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: ResourceJson,
    scope_spans: Vec<ScopeSpans>,
}

#[derive(Debug, Serialize)]
struct ResourceJson {
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<SpanJson>,
}

#[derive(Debug, Serialize)]
struct Scope {
    name: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpanJson {
    trace_id: String,
    span_id: String,
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<EventJson>,
    links: Vec<LinkJson>,
    status: StatusJson,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventJson {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkJson {
    trace_id: String,
    span_id: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct StatusJson {
    code: u8,
    message: String,
}

#[derive(Debug, Serialize)]
struct Attribute {
    key: String,
    value: AttributeValue,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
enum AttributeValue {
    BoolValue(bool),
    /// OTLP JSON carries 64-bit integers as strings.
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

pub struct SpanFormatter {
    resource: Resource,
}

impl SpanFormatter {
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// Wraps `batch` in a single `resourceSpans` entry carrying the service
    /// resource.
    pub fn format_batch(&self, batch: &[SpanData]) -> TraceDocument {
        let attributes = self
            .resource
            .iter()
            .map(|(key, value)| Attribute {
                key: key.to_string(),
                value: attribute_value(value),
            })
            .collect();

        TraceDocument {
            resource_spans: vec![ResourceSpans {
                resource: ResourceJson { attributes },
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(format_span).collect(),
                }],
            }],
        }
    }
}

fn format_span(span: &SpanData) -> SpanJson {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (code, message) = status(&span.status);

    SpanJson {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id,
        name: span.name.to_string(),
        kind: kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: attributes(&span.attributes),
        events: span.events.iter().map(format_event).collect(),
        links: span.links.iter().map(format_link).collect(),
        status: StatusJson { code, message },
    }
}

fn format_event(event: &Event) -> EventJson {
    EventJson {
        time_unix_nano: unix_nanos(event.timestamp),
        name: event.name.to_string(),
        attributes: attributes(&event.attributes),
    }
}

fn format_link(link: &Link) -> LinkJson {
    LinkJson {
        trace_id: format!("{:032x}", link.span_context.trace_id()),
        span_id: format!("{:016x}", link.span_context.span_id()),
        attributes: attributes(&link.attributes),
    }
}

fn attributes(values: &[KeyValue]) -> Vec<Attribute> {
    values
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: attribute_value(&kv.value),
        })
        .collect()
}

/// Arrays fall back to their string form.
fn attribute_value(value: &Value) -> AttributeValue {
    match value {
        Value::Bool(b) => AttributeValue::BoolValue(*b),
        Value::I64(i) => AttributeValue::IntValue(i.to_string()),
        Value::F64(f) => AttributeValue::DoubleValue(*f),
        Value::String(s) => AttributeValue::StringValue(s.to_string()),
        Value::Array(_) => AttributeValue::StringValue(value.to_string()),
    }
}

const fn kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
        .to_string()
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let formatter = SpanFormatter::new(Resource::new(vec![KeyValue::new(
            "service.name",
            "SafeNet",
        )]));

        let json = serde_json::to_value(formatter.format_batch(&[])).unwrap();
        let resource_spans = &json["resourceSpans"][0];

        let attributes = resource_spans["resource"]["attributes"].as_array().unwrap();
        assert!(attributes.iter().any(|attr| attr["key"] == "service.name"
            && attr["value"]["stringValue"] == "SafeNet"));
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "SafeNet");
        assert!(resource_spans["scopeSpans"][0]["spans"]
            .as_array()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn attribute_values_use_otlp_tags() {
        assert_eq!(
            serde_json::to_value(attribute_value(&Value::I64(42))).unwrap(),
            serde_json::json!({ "intValue": "42" })
        );
        assert_eq!(
            serde_json::to_value(attribute_value(&Value::Bool(true))).unwrap(),
            serde_json::json!({ "boolValue": true })
        );
        assert_eq!(
            attribute_value(&Value::from("camps")),
            AttributeValue::StringValue("camps".to_string())
        );
    }

    #[test]
    fn timestamps_are_nanoseconds_since_epoch() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_millis(1500);
        assert_eq!(unix_nanos(time), "1500000000");
        assert_eq!(kind_code(&SpanKind::Client), 3);
        assert_eq!(status(&Status::error("boom")), (2, "boom".to_string()));
    }
}
