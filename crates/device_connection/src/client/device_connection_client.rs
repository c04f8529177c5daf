use crate::domain::{GET_LAST_GATEWAY_OPERATION, SET_LAST_GATEWAY_OPERATION};
use common::dispatch::{inject_trace_context, ServiceRequest, ServiceResponse};
use common::domain::{DomainError, DomainResult};
use http::StatusCode;
use serde_json::Value;
use tower::{Service, ServiceExt};
use tracing::{debug, instrument};

/// Requesting side of the Device Connection API for a single tenant.
///
/// Requests are sent through any tower service speaking the request
/// envelope, e.g. a [`RequestDispatcher`](common::dispatch::RequestDispatcher)
/// or a transport client.
#[derive(Clone)]
pub struct DeviceConnectionClient<S> {
    tenant_id: String,
    service: S,
}

impl<S> DeviceConnectionClient<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = DomainError>
        + Clone
        + Send
        + Sync,
    S::Future: Send,
{
    pub fn new(tenant_id: impl Into<String>, service: S) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            service,
        }
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Get the JSON document describing the gateway that last acted on
    /// behalf of the device.
    #[instrument(skip(self), fields(tenant_id = %self.tenant_id))]
    pub async fn get_last_known_gateway_for_device(&self, device_id: &str) -> DomainResult<Value> {
        let request = self
            .new_request(GET_LAST_GATEWAY_OPERATION)
            .with_device(device_id);

        let response = self.send(request).await?;
        match (response.status, response.payload) {
            (status, Some(payload)) if status == StatusCode::OK.as_u16() => Ok(payload),
            (status, _) => Err(DomainError::from_status(status)),
        }
    }

    /// Record `gateway_id` as the gateway that last acted on behalf of the device.
    #[instrument(skip(self), fields(tenant_id = %self.tenant_id))]
    pub async fn set_last_known_gateway_for_device(
        &self,
        device_id: &str,
        gateway_id: &str,
    ) -> DomainResult<()> {
        let request = self
            .new_request(SET_LAST_GATEWAY_OPERATION)
            .with_device(device_id)
            .with_gateway(gateway_id);

        let response = self.send(request).await?;
        if response.status == StatusCode::NO_CONTENT.as_u16() {
            Ok(())
        } else {
            Err(DomainError::from_status(response.status))
        }
    }

    fn new_request(&self, operation: &str) -> ServiceRequest {
        ServiceRequest::new(operation)
            .with_tenant(self.tenant_id.clone())
            .with_trace_context(inject_trace_context())
    }

    async fn send(&self, request: ServiceRequest) -> DomainResult<ServiceResponse> {
        let operation = request.operation.clone();
        let response = self.service.clone().oneshot(request).await?;
        debug!(operation = %operation, status = response.status, "received response");
        Ok(response)
    }
}
