use common::dispatch::{ServiceRequest, ServiceResponse};
use common::domain::CacheDirective;
use http::StatusCode;
use serde_json::Value;

/// Outcome of a Device Connection service operation
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConnectionResult {
    pub status: u16,
    pub payload: Option<Value>,
    pub cache_directive: Option<CacheDirective>,
}

impl DeviceConnectionResult {
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            payload: None,
            cache_directive: None,
        }
    }

    /// A `200 OK` result carrying `payload`
    pub fn from_payload(payload: Value) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            payload: Some(payload),
            cache_directive: None,
        }
    }

    pub fn with_cache_directive(mut self, cache_directive: CacheDirective) -> Self {
        self.cache_directive = Some(cache_directive);
        self
    }

    /// Turn the result into the response to `request`
    pub fn into_response(self, request: &ServiceRequest) -> ServiceResponse {
        request
            .response(self.status)
            .with_payload(self.payload)
            .with_cache_directive(self.cache_directive)
    }
}
