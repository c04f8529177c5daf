use crate::domain::CacheDirective;
use serde_json::Value;
use std::collections::HashMap;

/// Carrier for W3C trace context headers (`traceparent`, `tracestate`).
pub type TraceHeaders = HashMap<String, String>;

/// Request envelope handed to a [`RequestDispatcher`](super::RequestDispatcher).
///
/// All identifiers are optional on the wire; which of them are mandatory is
/// decided per operation by the adapter processing it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceRequest {
    /// Name of the operation to invoke
    pub operation: String,
    pub tenant_id: Option<String>,
    pub device_id: Option<String>,
    pub gateway_id: Option<String>,
    pub payload: Option<Value>,
    /// Trace context of the caller, if it propagated one
    pub trace_context: Option<TraceHeaders>,
    /// Token used by the transport to correlate the response
    pub correlation_id: Option<String>,
}

impl ServiceRequest {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            ..Default::default()
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub fn with_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn with_gateway(mut self, gateway_id: impl Into<String>) -> Self {
        self.gateway_id = Some(gateway_id.into());
        self
    }

    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_trace_context(mut self, headers: TraceHeaders) -> Self {
        self.trace_context = Some(headers);
        self
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Create a response to this request carrying the request's correlation id.
    pub fn response(&self, status: u16) -> ServiceResponse {
        ServiceResponse {
            status,
            payload: None,
            cache_directive: None,
            correlation_id: self.correlation_id.clone(),
        }
    }
}

/// Response envelope produced for every successfully processed request.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceResponse {
    pub status: u16,
    pub payload: Option<Value>,
    pub cache_directive: Option<CacheDirective>,
    pub correlation_id: Option<String>,
}

impl ServiceResponse {
    pub fn with_payload(mut self, payload: Option<Value>) -> Self {
        self.payload = payload;
        self
    }

    pub fn with_cache_directive(mut self, cache_directive: Option<CacheDirective>) -> Self {
        self.cache_directive = cache_directive;
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
