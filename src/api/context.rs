//! Request context carried through Zellij's web request round trip.
//!
//! Zellij hands the context map given to `web_request` back untouched on the
//! matching `WebRequestResult`. The plugin uses it to route the response to
//! the screen that issued it, to discard stale responses by sequence number,
//! and to link the response span to the span that sent the request.

use crate::api::endpoints::Endpoint;
use crate::domain::error::{Result, SafeNetError};
use std::collections::BTreeMap;

const ENDPOINT_KEY: &str = "endpoint";
const SEQ_KEY: &str = "seq";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// Distributed tracing ids captured when a request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as 32 hex characters.
    pub trace_id: String,

    /// Span that issued the request, as 16 hex characters.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry ids of the current tracing span.
    ///
    /// Returns `None` when tracing is not exporting (invalid span context).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes the captured span the remote parent of spans opened while the
    /// returned guard is alive.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Identifies which request a response answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub endpoint: Endpoint,
    /// Sequence number issued by the owning screen.
    pub seq: u64,
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for `endpoint`, capturing the current trace ids.
    #[must_use]
    pub fn new(endpoint: Endpoint, seq: u64) -> Self {
        Self {
            endpoint,
            seq,
            trace: TraceContext::from_current(),
        }
    }

    /// Encodes the context as Zellij's string map.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(ENDPOINT_KEY.to_string(), self.endpoint.as_str().to_string());
        map.insert(SEQ_KEY.to_string(), self.seq.to_string());
        if let Some(trace) = &self.trace {
            map.insert(TRACE_ID_KEY.to_string(), trace.trace_id.clone());
            map.insert(PARENT_SPAN_ID_KEY.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map produced by [`RequestContext::to_map`].
    ///
    /// # Errors
    ///
    /// Returns [`SafeNetError::Context`] when the endpoint or sequence number
    /// is missing or malformed. Trace ids are optional.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let endpoint = map
            .get(ENDPOINT_KEY)
            .and_then(|e| Endpoint::parse(e))
            .ok_or_else(|| SafeNetError::Context("missing or unknown endpoint".to_string()))?;

        let seq = map
            .get(SEQ_KEY)
            .and_then(|s| s.parse::<u64>().ok())
            .ok_or_else(|| SafeNetError::Context("missing or invalid seq".to_string()))?;

        let trace = match (map.get(TRACE_ID_KEY), map.get(PARENT_SPAN_ID_KEY)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Ok(Self { endpoint, seq, trace })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ListKind;

    #[test]
    fn context_round_trips_through_string_map() {
        let ctx = RequestContext {
            endpoint: Endpoint::List(ListKind::Vehicles),
            seq: 42,
            trace: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".to_string(),
                parent_span_id: "b7ad6b7169203331".to_string(),
            }),
        };
        let decoded = RequestContext::from_map(&ctx.to_map()).unwrap();
        assert_eq!(decoded, ctx);
    }

    #[test]
    fn trace_ids_are_optional() {
        let ctx = RequestContext {
            endpoint: Endpoint::RegisterOrganization,
            seq: 1,
            trace: None,
        };
        let map = ctx.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(RequestContext::from_map(&map).unwrap(), ctx);
    }

    #[test]
    fn rejects_foreign_maps() {
        let mut map = BTreeMap::new();
        map.insert("endpoint".to_string(), "camps".to_string());
        assert!(matches!(
            RequestContext::from_map(&map),
            Err(SafeNetError::Context(_))
        ));
        assert!(RequestContext::from_map(&BTreeMap::new()).is_err());
    }

    #[test]
    fn no_trace_context_without_exporter() {
        assert_eq!(TraceContext::from_current(), None);
    }
}
