use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use super::{ServiceRequest, ServiceResponse};
use crate::domain::DomainError;
use tower::{Layer, Service};
use tracing::{error, info, warn};

/// Tower layer logging the outcome of every dispatched service request
#[derive(Clone, Default)]
pub struct DispatchLoggingLayer;

impl DispatchLoggingLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for DispatchLoggingLayer {
    type Service = DispatchLoggingService<S>;

    fn layer(&self, service: S) -> Self::Service {
        DispatchLoggingService { inner: service }
    }
}

/// Service that logs operation, status and duration of each request
#[derive(Clone)]
pub struct DispatchLoggingService<S> {
    inner: S,
}

impl<S> Service<ServiceRequest> for DispatchLoggingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = DomainError>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: ServiceRequest) -> Self::Future {
        let operation = req.operation.clone();
        let start = Instant::now();
        // call the instance that was driven to readiness, keep the clone for later
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let result = inner.call(req).await;
            let duration_ms = start.elapsed().as_millis();

            match &result {
                Ok(response) => {
                    let status = response.status;
                    info!(
                        operation = %operation,
                        status,
                        duration_ms = %duration_ms,
                        "processed {operation} in {duration_ms}ms [{status}]"
                    );
                }
                Err(e) if e.is_client_error() => {
                    let status = e.status();
                    warn!(
                        operation = %operation,
                        status,
                        duration_ms = %duration_ms,
                        error = %e,
                        "rejected {operation} in {duration_ms}ms [{status}]: {e}"
                    );
                }
                Err(e) => {
                    let status = e.status();
                    error!(
                        operation = %operation,
                        status,
                        duration_ms = %duration_ms,
                        error = %e,
                        "failed to process {operation} in {duration_ms}ms [{status}]: {e}"
                    );
                }
            }

            result
        })
    }
}
