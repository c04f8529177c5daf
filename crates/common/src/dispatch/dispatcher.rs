use super::{CustomOperations, ServiceRequest, ServiceResponse};
use crate::domain::{DomainError, DomainResult};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::fmt::Debug;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::Service;
use tracing::debug;

/// A backend API bound to the shared request dispatcher.
///
/// Each API (device connection, registration, ...) implements this once and
/// gets operation routing, custom operation support and the tower service
/// surface from [`RequestDispatcher`].
#[async_trait]
pub trait ApiAdapter: Send + Sync + 'static {
    /// The closed set of operations the API defines.
    type Action: Copy + Debug + Send;

    /// Component name reported on request spans.
    fn component_name(&self) -> &str;

    /// Map an operation name to a known action, `None` if the API does not define it.
    fn resolve_action(&self, operation: &str) -> Option<Self::Action>;

    /// Process a request for a known action.
    ///
    /// Implementations validate mandatory fields before calling the backend
    /// and must report backend failures through the returned result.
    async fn process_action(
        &self,
        action: Self::Action,
        request: ServiceRequest,
    ) -> DomainResult<ServiceResponse>;
}

/// Routes service requests to an [`ApiAdapter`] or its custom operations.
pub struct RequestDispatcher<A> {
    adapter: Arc<A>,
    custom_operations: Arc<CustomOperations>,
}

impl<A> Clone for RequestDispatcher<A> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            custom_operations: Arc::clone(&self.custom_operations),
        }
    }
}

impl<A: ApiAdapter> RequestDispatcher<A> {
    pub fn new(adapter: A) -> Self {
        Self::from_arc(Arc::new(adapter))
    }

    pub fn from_arc(adapter: Arc<A>) -> Self {
        Self {
            adapter,
            custom_operations: Arc::new(CustomOperations::default()),
        }
    }

    pub fn with_custom_operations(mut self, custom_operations: CustomOperations) -> Self {
        self.custom_operations = Arc::new(custom_operations);
        self
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Process a single request.
    ///
    /// Operations unknown to the adapter go to the custom operation registry,
    /// which rejects them with a client error unless a handler was registered.
    pub async fn process_request(&self, request: ServiceRequest) -> DomainResult<ServiceResponse> {
        match self.adapter.resolve_action(&request.operation) {
            Some(action) => {
                debug!(
                    component = %self.adapter.component_name(),
                    ?action,
                    "dispatching request"
                );
                self.adapter.process_action(action, request).await
            }
            None => self.custom_operations.process(request).await,
        }
    }
}

impl<A: ApiAdapter> Service<ServiceRequest> for RequestDispatcher<A> {
    type Response = ServiceResponse;
    type Error = DomainError;
    type Future = BoxFuture<'static, DomainResult<ServiceResponse>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: ServiceRequest) -> Self::Future {
        let dispatcher = self.clone();
        Box::pin(async move { dispatcher.process_request(request).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::MockCustomOperationHandler;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum EchoAction {
        Echo,
    }

    #[derive(Default)]
    struct EchoAdapter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ApiAdapter for EchoAdapter {
        type Action = EchoAction;

        fn component_name(&self) -> &str {
            "EchoAdapter"
        }

        fn resolve_action(&self, operation: &str) -> Option<EchoAction> {
            match operation {
                "echo" => Some(EchoAction::Echo),
                _ => None,
            }
        }

        async fn process_action(
            &self,
            _action: EchoAction,
            request: ServiceRequest,
        ) -> DomainResult<ServiceResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let payload = request.payload.clone();
            Ok(request.response(200).with_payload(payload))
        }
    }

    #[tokio::test]
    async fn test_known_operation_reaches_adapter() {
        let dispatcher = RequestDispatcher::new(EchoAdapter::default());

        let response = dispatcher
            .clone()
            .oneshot(ServiceRequest::new("echo").with_payload(serde_json::json!({"a": 1})))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.payload, Some(serde_json::json!({"a": 1})));
        assert_eq!(dispatcher.adapter().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_operation_is_rejected_by_default() {
        let dispatcher = RequestDispatcher::new(EchoAdapter::default());

        let result = dispatcher
            .clone()
            .oneshot(ServiceRequest::new("reverse"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedOperation(_)));
        assert_eq!(err.status(), 400);
        assert_eq!(dispatcher.adapter().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_operation_uses_registered_handler() {
        let mut handler = MockCustomOperationHandler::new();
        handler
            .expect_process()
            .times(1)
            .returning(|req| Ok(req.response(200)));

        let dispatcher = RequestDispatcher::new(EchoAdapter::default()).with_custom_operations(
            CustomOperations::new().with_handler("reverse", Arc::new(handler)),
        );

        let response = dispatcher
            .oneshot(ServiceRequest::new("reverse"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
    }
}
