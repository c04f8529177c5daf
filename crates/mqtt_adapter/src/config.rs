use crate::mqtt::{EndpointTable, TopicResolver};
use common::domain::{DomainError, DomainResult};
use common::telemetry::TelemetryConfig;
use config::{Config, ConfigError, Environment};
use device_connection::adapter::DeviceConnectionAdapter;
use device_connection::domain::DeviceConnectionService;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Environment variable prefix, e.g. `MQTT_ADAPTER_LOG_LEVEL`
pub const ENV_PREFIX: &str = "MQTT_ADAPTER";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AdapterConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Additional endpoint names as comma-separated `alias=kind` pairs
    /// (e.g. `tel=telemetry,evt=event`)
    #[serde(default)]
    pub endpoint_aliases: String,

    /// Component name reported on request spans
    #[serde(default = "default_component_name")]
    pub component_name: String,

    // OpenTelemetry configuration
    /// OpenTelemetry OTLP endpoint (gRPC)
    #[serde(default = "default_otel_endpoint")]
    pub otel_endpoint: String,

    /// Enable OpenTelemetry export
    #[serde(default = "default_otel_enabled")]
    pub otel_enabled: bool,

    /// Service name for OpenTelemetry resource
    #[serde(default = "default_otel_service_name")]
    pub otel_service_name: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_component_name() -> String {
    "mqtt-adapter".to_string()
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_otel_enabled() -> bool {
    false
}

fn default_otel_service_name() -> String {
    "mqtt-adapter".to_string()
}

impl AdapterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self.otel_service_name.clone(),
            otel_endpoint: self.otel_endpoint.clone(),
            otel_enabled: self.otel_enabled,
            log_level: self.log_level.clone(),
        }
    }

    /// Default endpoint names plus the configured aliases
    pub fn endpoint_table(&self) -> DomainResult<EndpointTable> {
        EndpointTable::default().with_aliases(&self.endpoint_aliases)
    }

    pub fn topic_resolver(&self) -> DomainResult<TopicResolver> {
        self.endpoint_table().map(TopicResolver::new)
    }

    /// Device Connection adapter reporting the configured component name on its spans
    pub fn device_connection_adapter(
        &self,
        service: Arc<dyn DeviceConnectionService>,
    ) -> DeviceConnectionAdapter {
        DeviceConnectionAdapter::new(service).with_component_name(self.component_name.clone())
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.component_name.trim().is_empty() {
            return Err(DomainError::InvalidConfig(
                "Component name cannot be empty".to_string(),
            ));
        }
        self.endpoint_table().map(|_| ())
    }
}
