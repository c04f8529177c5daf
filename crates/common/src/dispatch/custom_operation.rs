use super::{ServiceRequest, ServiceResponse};
use crate::domain::{DomainError, DomainResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Handler for operations an API does not define itself.
///
/// Adapters register these to support additional operations without
/// changing the shared dispatcher.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CustomOperationHandler: Send + Sync {
    async fn process(&self, request: ServiceRequest) -> DomainResult<ServiceResponse>;
}

/// Default fallback: every unknown operation is a bad request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectUnknownOperation;

#[async_trait]
impl CustomOperationHandler for RejectUnknownOperation {
    async fn process(&self, request: ServiceRequest) -> DomainResult<ServiceResponse> {
        debug!(operation = %request.operation, "invalid operation in request message");
        Err(DomainError::UnsupportedOperation(request.operation))
    }
}

/// Registry of custom operation handlers with a fallback for everything else.
#[derive(Clone)]
pub struct CustomOperations {
    handlers: HashMap<String, Arc<dyn CustomOperationHandler>>,
    fallback: Arc<dyn CustomOperationHandler>,
}

impl Default for CustomOperations {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
            fallback: Arc::new(RejectUnknownOperation),
        }
    }
}

impl CustomOperations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a single operation name.
    pub fn with_handler(
        mut self,
        operation: impl Into<String>,
        handler: Arc<dyn CustomOperationHandler>,
    ) -> Self {
        self.handlers.insert(operation.into(), handler);
        self
    }

    /// Replace the handler used for operations without a registered handler.
    pub fn with_fallback(mut self, fallback: Arc<dyn CustomOperationHandler>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn contains(&self, operation: &str) -> bool {
        self.handlers.contains_key(operation)
    }

    /// Route a request to its registered handler, or the fallback.
    pub async fn process(&self, request: ServiceRequest) -> DomainResult<ServiceResponse> {
        let handler = self
            .handlers
            .get(&request.operation)
            .unwrap_or(&self.fallback)
            .clone();

        handler.process(request).await
    }
}
