use crate::domain::{DeviceConnectionAction, DeviceConnectionService};
use async_trait::async_trait;
use common::dispatch::{
    finish_span_on_completion, new_child_span, ApiAdapter, RequestDispatcher, ServiceRequest,
    ServiceResponse, SpanTags,
};
use common::domain::{DomainError, DomainResult};
use std::sync::Arc;
use tracing::{debug, error, Span};

const DEFAULT_COMPONENT_NAME: &str = "DeviceConnectionAdapter";

/// Binds a [`DeviceConnectionService`] to the request dispatcher.
///
/// Validates the identifiers each operation needs before invoking the
/// service and maps the service result into the response envelope.
pub struct DeviceConnectionAdapter {
    service: Arc<dyn DeviceConnectionService>,
    component_name: String,
}

impl DeviceConnectionAdapter {
    pub fn new(service: Arc<dyn DeviceConnectionService>) -> Self {
        Self {
            service,
            component_name: DEFAULT_COMPONENT_NAME.to_string(),
        }
    }

    pub fn with_component_name(mut self, component_name: impl Into<String>) -> Self {
        self.component_name = component_name.into();
        self
    }

    /// Wrap the adapter in a dispatcher serving the Device Connection API
    pub fn into_dispatcher(self) -> RequestDispatcher<Self> {
        RequestDispatcher::new(self)
    }

    fn new_span(&self, action: DeviceConnectionAction, request: &ServiceRequest, tags: SpanTags<'_>) -> Span {
        new_child_span(
            &self.component_name,
            action.span_name(),
            request.trace_context.as_ref(),
            tags,
        )
    }

    async fn process_get_last_gateway_request(
        &self,
        request: ServiceRequest,
    ) -> DomainResult<ServiceResponse> {
        let span = self.new_span(
            DeviceConnectionAction::GetLastGateway,
            &request,
            SpanTags::new(request.tenant_id.as_deref(), request.device_id.as_deref(), None),
        );
        let service = Arc::clone(&self.service);

        finish_span_on_completion(span, async move {
            let (Some(tenant_id), Some(device_id)) =
                (present(&request.tenant_id), present(&request.device_id))
            else {
                error!("missing tenant and/or device");
                return Err(missing_fields(&[
                    ("tenant_id", &request.tenant_id),
                    ("device_id", &request.device_id),
                ]));
            };

            debug!(tenant_id, device_id, "getting last known gateway");
            let result = service
                .get_last_known_gateway_for_device(tenant_id, device_id, &Span::current())
                .await?;

            Ok(result.into_response(&request))
        })
        .await
    }

    async fn process_set_last_gateway_request(
        &self,
        request: ServiceRequest,
    ) -> DomainResult<ServiceResponse> {
        let span = self.new_span(
            DeviceConnectionAction::SetLastGateway,
            &request,
            SpanTags::new(
                request.tenant_id.as_deref(),
                request.device_id.as_deref(),
                request.gateway_id.as_deref(),
            ),
        );
        let service = Arc::clone(&self.service);

        finish_span_on_completion(span, async move {
            let (Some(tenant_id), Some(device_id), Some(gateway_id)) = (
                present(&request.tenant_id),
                present(&request.device_id),
                present(&request.gateway_id),
            ) else {
                error!("missing tenant, device and/or gateway");
                return Err(missing_fields(&[
                    ("tenant_id", &request.tenant_id),
                    ("device_id", &request.device_id),
                    ("gateway_id", &request.gateway_id),
                ]));
            };

            debug!(tenant_id, device_id, gateway_id, "setting last known gateway");
            let result = service
                .set_last_known_gateway_for_device(tenant_id, device_id, gateway_id, &Span::current())
                .await?;

            Ok(result.into_response(&request))
        })
        .await
    }
}

#[async_trait]
impl ApiAdapter for DeviceConnectionAdapter {
    type Action = DeviceConnectionAction;

    fn component_name(&self) -> &str {
        &self.component_name
    }

    fn resolve_action(&self, operation: &str) -> Option<DeviceConnectionAction> {
        DeviceConnectionAction::from_operation(operation)
    }

    async fn process_action(
        &self,
        action: DeviceConnectionAction,
        request: ServiceRequest,
    ) -> DomainResult<ServiceResponse> {
        match action {
            DeviceConnectionAction::GetLastGateway => {
                self.process_get_last_gateway_request(request).await
            }
            DeviceConnectionAction::SetLastGateway => {
                self.process_set_last_gateway_request(request).await
            }
        }
    }
}

/// Empty identifiers count as missing
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn missing_fields(fields: &[(&str, &Option<String>)]) -> DomainError {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(name, _)| *name)
        .collect();

    DomainError::MissingRequiredField(missing.join(", "))
}
