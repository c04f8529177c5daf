use common::domain::{DomainError, DomainResult};

/// Segments of an MQTT topic base path
/// (`{endpoint}/{tenant_id}/{device_id}[/{extra}...]`).
///
/// Empty tenant or device segments are reported as absent; whether that is
/// acceptable depends on how the topic is used. Extra segments are kept
/// verbatim, including empty ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTopic {
    pub endpoint: String,
    pub tenant_id: Option<String>,
    pub device_id: Option<String>,
    pub extra_segments: Vec<String>,
}

impl ParsedTopic {
    pub fn require_tenant(&self) -> DomainResult<&str> {
        self.tenant_id.as_deref().ok_or_else(|| {
            DomainError::MalformedTopic(format!(
                "Tenant ID missing in topic '{}': expected '{{endpoint}}/{{tenant_id}}/{{device_id}}'",
                self
            ))
        })
    }

    pub fn require_device(&self) -> DomainResult<&str> {
        self.device_id.as_deref().ok_or_else(|| {
            DomainError::MalformedTopic(format!(
                "Device ID missing in topic '{}': expected '{{endpoint}}/{{tenant_id}}/{{device_id}}'",
                self
            ))
        })
    }
}

impl std::fmt::Display for ParsedTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.endpoint)?;
        let ids = [self.tenant_id.as_deref(), self.device_id.as_deref()];
        let mut trailing = self.extra_segments.iter().map(String::as_str).peekable();
        let last_id = ids.iter().rposition(Option::is_some);

        for (index, id) in ids.iter().enumerate() {
            let needed = last_id.is_some_and(|last| index <= last) || trailing.peek().is_some();
            if needed {
                write!(f, "/{}", id.unwrap_or_default())?;
            }
        }
        for segment in trailing {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

/// Parse an MQTT topic base path (property bag already removed).
///
/// # Returns
/// * `Ok(ParsedTopic)` - the topic has a non-empty endpoint segment
/// * `Err(DomainError::MalformedTopic)` - empty topic or empty endpoint
///
/// # Examples
/// ```
/// use mqtt_adapter::mqtt::parse_topic;
///
/// let parsed = parse_topic("t/tenant-001/device-123").unwrap();
/// assert_eq!(parsed.endpoint, "t");
/// assert_eq!(parsed.tenant_id.as_deref(), Some("tenant-001"));
/// assert_eq!(parsed.device_id.as_deref(), Some("device-123"));
/// ```
pub fn parse_topic(topic: &str) -> DomainResult<ParsedTopic> {
    let mut segments = topic.split('/');

    let endpoint = segments.next().unwrap_or_default();
    if endpoint.is_empty() {
        return Err(DomainError::MalformedTopic(format!(
            "Endpoint missing in topic '{}'",
            topic
        )));
    }

    let mut next_id = || {
        segments
            .next()
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
    };
    let tenant_id = next_id();
    let device_id = next_id();

    // extras are positional, empty ones are kept
    let extra_segments = segments.map(str::to_string).collect();

    Ok(ParsedTopic {
        endpoint: endpoint.to_string(),
        tenant_id,
        device_id,
        extra_segments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_topic() {
        let parsed = parse_topic("telemetry/tenant/device").unwrap();
        assert_eq!(parsed.endpoint, "telemetry");
        assert_eq!(parsed.tenant_id.as_deref(), Some("tenant"));
        assert_eq!(parsed.device_id.as_deref(), Some("device"));
        assert!(parsed.extra_segments.is_empty());
        assert_eq!(parsed.require_tenant().unwrap(), "tenant");
        assert_eq!(parsed.require_device().unwrap(), "device");
    }

    #[test]
    fn test_parse_topic_with_extra_segments() {
        let parsed = parse_topic("c/tenant/device/req/1234/setBrightness").unwrap();
        assert_eq!(parsed.endpoint, "c");
        assert_eq!(parsed.extra_segments, vec!["req", "1234", "setBrightness"]);
    }

    #[test]
    fn test_parse_topic_keeps_empty_extra_segments() {
        let parsed = parse_topic("c/tenant/device/req//setBrightness").unwrap();
        assert_eq!(parsed.extra_segments, vec!["req", "", "setBrightness"]);
    }

    #[test]
    fn test_parse_topic_endpoint_only() {
        let parsed = parse_topic("t").unwrap();
        assert_eq!(parsed.endpoint, "t");
        assert!(parsed.tenant_id.is_none());
        assert!(parsed.device_id.is_none());
        assert!(matches!(
            parsed.require_tenant(),
            Err(DomainError::MalformedTopic(_))
        ));
    }

    #[test]
    fn test_parse_topic_empty_tenant() {
        let parsed = parse_topic("t//device").unwrap();
        assert!(parsed.tenant_id.is_none());
        assert_eq!(parsed.device_id.as_deref(), Some("device"));
    }

    #[test]
    fn test_parse_topic_missing_device() {
        let parsed = parse_topic("e/tenant").unwrap();
        assert_eq!(parsed.tenant_id.as_deref(), Some("tenant"));
        assert!(parsed.require_device().is_err());
    }

    #[test]
    fn test_parse_topic_empty_string() {
        assert!(matches!(parse_topic(""), Err(DomainError::MalformedTopic(_))));
    }

    #[test]
    fn test_parse_topic_empty_endpoint() {
        assert!(parse_topic("/tenant/device").is_err());
    }

    #[test]
    fn test_display_reconstructs_topic() {
        for topic in [
            "t/tenant/device",
            "t/tenant",
            "t",
            "t//device",
            "c/tenant/device/req/1",
            "c/tenant/device/req//setBrightness",
            "t/tenant/device/",
        ] {
            assert_eq!(parse_topic(topic).unwrap().to_string(), topic);
        }
    }
}
