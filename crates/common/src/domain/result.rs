use http::StatusCode;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed topic: {0}")]
    MalformedTopic(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid cache directive: {0}")]
    InvalidCacheDirective(String),

    /// Failure reported by a service, carried with its original status.
    #[error("Service invocation failed with status {status}: {message}")]
    ServiceInvocation { status: u16, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DomainError {
    /// Create a service invocation error using the canonical reason phrase as message.
    pub fn from_status(status: u16) -> Self {
        let message = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("unknown status")
            .to_string();

        DomainError::ServiceInvocation { status, message }
    }

    /// Numeric status code (HTTP semantics) describing this error.
    pub fn status(&self) -> u16 {
        match self {
            DomainError::MalformedTopic(_)
            | DomainError::MissingRequiredField(_)
            | DomainError::UnsupportedOperation(_)
            | DomainError::InvalidCacheDirective(_) => StatusCode::BAD_REQUEST.as_u16(),

            DomainError::ServiceInvocation { status, .. } => *status,

            DomainError::InvalidConfig(_) | DomainError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR.as_u16()
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status())
    }
}
