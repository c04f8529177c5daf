/// Identity of a device that has been authenticated by the protocol adapter.
///
/// Produced by the authentication layer; everything downstream treats the
/// tenant and device id of this value as authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
    pub tenant_id: String,
    pub device_id: String,
}

impl Device {
    pub fn new(tenant_id: impl Into<String>, device_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            device_id: device_id.into(),
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.tenant_id, self.device_id)
    }
}
