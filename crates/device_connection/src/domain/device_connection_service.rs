use super::DeviceConnectionResult;
use async_trait::async_trait;
use common::domain::DomainResult;
use tracing::Span;

/// Backend keeping track of the gateways devices last communicated through.
///
/// Implementations report failures through the returned result. The span is
/// the request span opened by the adapter and may be used to add events.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DeviceConnectionService: Send + Sync {
    /// Get the gateway that last acted on behalf of the device.
    ///
    /// Returns status 200 with a payload naming the gateway, or 404 if
    /// there is none.
    async fn get_last_known_gateway_for_device(
        &self,
        tenant_id: &str,
        device_id: &str,
        span: &Span,
    ) -> DomainResult<DeviceConnectionResult>;

    /// Record the gateway that last acted on behalf of the device.
    ///
    /// Returns status 204 on success.
    async fn set_last_known_gateway_for_device(
        &self,
        tenant_id: &str,
        device_id: &str,
        gateway_id: &str,
        span: &Span,
    ) -> DomainResult<DeviceConnectionResult>;
}
