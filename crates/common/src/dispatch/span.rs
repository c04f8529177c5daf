use super::{set_parent_from_headers, ServiceResponse, TraceHeaders};
use crate::domain::DomainResult;
use std::future::Future;
use tracing::{debug, field, info_span, Instrument, Span};

/// Identifiers a request span is tagged with; absent ones are left off the span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanTags<'a> {
    pub tenant_id: Option<&'a str>,
    pub device_id: Option<&'a str>,
    pub gateway_id: Option<&'a str>,
}

impl<'a> SpanTags<'a> {
    pub fn new(
        tenant_id: Option<&'a str>,
        device_id: Option<&'a str>,
        gateway_id: Option<&'a str>,
    ) -> Self {
        Self {
            tenant_id,
            device_id,
            gateway_id,
        }
    }

    /// The tags that carry a value, as `(field, value)` pairs.
    pub fn present(&self) -> Vec<(&'static str, &'a str)> {
        [
            ("tenant_id", self.tenant_id),
            ("device_id", self.device_id),
            ("gateway_id", self.gateway_id),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

/// Create a server span for processing a single service request.
///
/// The span does not inherit the currently active span. When the request
/// carries trace context headers the span continues the caller's trace.
/// All tags are applied before the span is handed out.
pub fn new_child_span(
    component: &str,
    operation_name: &str,
    trace_context: Option<&TraceHeaders>,
    tags: SpanTags<'_>,
) -> Span {
    let span = info_span!(
        parent: None,
        "service_request",
        otel.name = %operation_name,
        otel.kind = "server",
        component = %component,
        tenant_id = field::Empty,
        device_id = field::Empty,
        gateway_id = field::Empty,
        http.status_code = field::Empty,
        otel.status_code = field::Empty,
        otel.status_description = field::Empty,
    );

    for (key, value) in tags.present() {
        span.record(key, value);
    }
    set_parent_from_headers(&span, trace_context);

    span
}

/// Run `future` inside `span` and record its outcome on the span.
///
/// The span is moved into the returned future and closes when that future
/// completes or is dropped, whichever path the request takes.
pub async fn finish_span_on_completion<F>(span: Span, future: F) -> DomainResult<ServiceResponse>
where
    F: Future<Output = DomainResult<ServiceResponse>>,
{
    async move {
        let result = future.await;
        let current = Span::current();

        match &result {
            Ok(response) => {
                current.record("http.status_code", response.status);
                current.record("otel.status_code", "OK");
            }
            Err(e) => {
                current.record("http.status_code", e.status());
                current.record("otel.status_code", "ERROR");
                current.record("otel.status_description", field::display(e));
                debug!(error = %e, "request failed");
            }
        }

        result
    }
    .instrument(span)
    .await
}
