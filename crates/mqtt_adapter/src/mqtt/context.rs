use super::{parse_topic, EndpointKind, EndpointTable, ParsedTopic, PropertyBag};
use common::domain::{Device, DomainResult};
use rumqttc::{Publish, QoS};
use std::sync::OnceLock;
use tracing::debug;

/// Property bag key carrying the payload's content type
pub const CONTENT_TYPE_PROPERTY: &str = "content-type";

/// Builds [`MqttContext`]s using a configured endpoint table.
#[derive(Debug, Clone, Default)]
pub struct TopicResolver {
    endpoints: EndpointTable,
}

impl TopicResolver {
    pub fn new(endpoints: EndpointTable) -> Self {
        Self { endpoints }
    }

    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    /// Build a context for a publish from a device that has not been authenticated.
    ///
    /// Tenant and device are taken from the topic, which therefore needs
    /// endpoint, tenant and device segments.
    pub fn context_from_publish<'a>(&self, message: &'a Publish) -> DomainResult<MqttContext<'a>> {
        MqttContext::build(message, None, &self.endpoints)
    }

    /// Build a context for a publish from an authenticated device.
    ///
    /// Tenant and device are always those of `device`; the topic only needs
    /// an endpoint segment and its tenant/device segments are ignored.
    pub fn context_from_authenticated_publish<'a>(
        &self,
        message: &'a Publish,
        device: Device,
    ) -> DomainResult<MqttContext<'a>> {
        MqttContext::build(message, Some(device), &self.endpoints)
    }
}

fn default_resolver() -> &'static TopicResolver {
    static RESOLVER: OnceLock<TopicResolver> = OnceLock::new();
    RESOLVER.get_or_init(TopicResolver::default)
}

/// Decoded view of a single MQTT PUBLISH packet.
///
/// Borrows the packet it was created from and never changes after creation.
#[derive(Debug, Clone)]
pub struct MqttContext<'a> {
    message: &'a Publish,
    endpoint: EndpointKind,
    tenant_id: String,
    device_id: String,
    topic: String,
    parsed_topic: ParsedTopic,
    property_bag: PropertyBag,
    authenticated_device: Option<Device>,
}

impl<'a> MqttContext<'a> {
    /// See [`TopicResolver::context_from_publish`]; uses the default endpoint table.
    pub fn from_publish(message: &'a Publish) -> DomainResult<Self> {
        default_resolver().context_from_publish(message)
    }

    /// See [`TopicResolver::context_from_authenticated_publish`]; uses the default endpoint table.
    pub fn from_authenticated_publish(message: &'a Publish, device: Device) -> DomainResult<Self> {
        default_resolver().context_from_authenticated_publish(message, device)
    }

    fn build(
        message: &'a Publish,
        device: Option<Device>,
        endpoints: &EndpointTable,
    ) -> DomainResult<Self> {
        let (base, property_bag) = PropertyBag::split(&message.topic);
        let parsed_topic = parse_topic(base)?;
        let endpoint = endpoints.resolve(&parsed_topic.endpoint);

        let (tenant_id, device_id) = match &device {
            Some(device) => {
                if parsed_topic
                    .tenant_id
                    .as_deref()
                    .is_some_and(|tenant| tenant != device.tenant_id)
                {
                    debug!(
                        topic = %message.topic,
                        tenant_id = %device.tenant_id,
                        "ignoring tenant asserted in topic of authenticated device"
                    );
                }
                (device.tenant_id.clone(), device.device_id.clone())
            }
            None => (
                parsed_topic.require_tenant()?.to_string(),
                parsed_topic.require_device()?.to_string(),
            ),
        };

        Ok(Self {
            message,
            endpoint,
            tenant_id,
            device_id,
            topic: base.to_string(),
            parsed_topic,
            property_bag,
            authenticated_device: device,
        })
    }

    /// The PUBLISH packet this context was created from
    pub fn message(&self) -> &'a Publish {
        self.message
    }

    pub fn endpoint(&self) -> EndpointKind {
        self.endpoint
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Topic without the property bag
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn parsed_topic(&self) -> &ParsedTopic {
        &self.parsed_topic
    }

    /// Topic segments following the device id
    pub fn extra_segments(&self) -> &[String] {
        &self.parsed_topic.extra_segments
    }

    pub fn property_bag(&self) -> &PropertyBag {
        &self.property_bag
    }

    pub fn authenticated_device(&self) -> Option<&Device> {
        self.authenticated_device.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated_device.is_some()
    }

    pub fn payload(&self) -> &[u8] {
        &self.message.payload
    }

    pub fn qos(&self) -> QoS {
        self.message.qos
    }

    /// Content type given in the property bag, if any
    pub fn content_type(&self) -> Option<&str> {
        self.property_bag
            .get(CONTENT_TYPE_PROPERTY)
            .filter(|value| !value.is_empty())
    }
}
