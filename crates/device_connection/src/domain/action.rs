/// Operation name of the *get last known gateway* request
pub const GET_LAST_GATEWAY_OPERATION: &str = "get-last-known-gateway";
/// Operation name of the *set last known gateway* request
pub const SET_LAST_GATEWAY_OPERATION: &str = "set-last-known-gateway";

/// Operations defined by the Device Connection API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceConnectionAction {
    GetLastGateway,
    SetLastGateway,
}

impl DeviceConnectionAction {
    pub fn from_operation(operation: &str) -> Option<Self> {
        match operation {
            GET_LAST_GATEWAY_OPERATION => Some(DeviceConnectionAction::GetLastGateway),
            SET_LAST_GATEWAY_OPERATION => Some(DeviceConnectionAction::SetLastGateway),
            _ => None,
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            DeviceConnectionAction::GetLastGateway => GET_LAST_GATEWAY_OPERATION,
            DeviceConnectionAction::SetLastGateway => SET_LAST_GATEWAY_OPERATION,
        }
    }

    /// Human readable name used for request spans
    pub fn span_name(&self) -> &'static str {
        match self {
            DeviceConnectionAction::GetLastGateway => "get last known gateway",
            DeviceConnectionAction::SetLastGateway => "set last known gateway",
        }
    }
}
