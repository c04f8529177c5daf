use super::TraceHeaders;
use opentelemetry::{global, Context};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// W3C Trace Context header carrying the parent span
pub const TRACEPARENT: &str = "traceparent";

/// Capture the current span's trace context as W3C headers.
///
/// Called by requesting clients so the serving side can continue the trace.
pub fn inject_trace_context() -> TraceHeaders {
    let mut headers = TraceHeaders::new();
    global::get_text_map_propagator(|propagator| {
        let ctx = tracing::Span::current().context();
        propagator.inject_context(&ctx, &mut headers);
    });
    headers
}

/// Extract an OpenTelemetry context from W3C headers.
pub fn extract_trace_context(headers: &TraceHeaders) -> Context {
    global::get_text_map_propagator(|propagator| propagator.extract(headers))
}

/// Parent `span` on the trace carried by `headers`, if any.
pub fn set_parent_from_headers(span: &tracing::Span, headers: Option<&TraceHeaders>) {
    if let Some(headers) = headers.filter(|h| h.contains_key(TRACEPARENT)) {
        span.set_parent(extract_trace_context(headers));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::propagation::Extractor;

    #[test]
    fn test_inject_without_otel_does_not_panic() {
        // Without a propagator installed the carrier may stay empty
        let _headers = inject_trace_context();
    }

    #[test]
    fn test_extract_handles_empty_headers() {
        let headers = TraceHeaders::new();
        let _ctx = extract_trace_context(&headers);
    }

    #[test]
    fn test_set_parent_ignores_missing_headers() {
        let span = tracing::info_span!("test");
        set_parent_from_headers(&span, None);
        set_parent_from_headers(&span, Some(&TraceHeaders::new()));
    }

    #[test]
    fn test_traceparent_is_readable_from_carrier() {
        let mut headers = TraceHeaders::new();
        headers.insert(
            TRACEPARENT.to_string(),
            "00-0af7651916cd43dd8448eb211c80319c-b7ad6b7169203331-01".to_string(),
        );

        let value = Extractor::get(&headers, TRACEPARENT);
        assert!(value.is_some_and(|v| v.starts_with("00-")));
    }
}
