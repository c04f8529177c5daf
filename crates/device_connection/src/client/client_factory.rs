use super::DeviceConnectionClient;
use common::dispatch::{ServiceRequest, ServiceResponse};
use common::domain::DomainError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::Service;
use tracing::debug;

/// Hands out one [`DeviceConnectionClient`] per tenant, all sharing the
/// same underlying service.
pub struct DeviceConnectionClientFactory<S> {
    service: S,
    clients: RwLock<HashMap<String, Arc<DeviceConnectionClient<S>>>>,
}

impl<S> DeviceConnectionClientFactory<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = DomainError>
        + Clone
        + Send
        + Sync,
    S::Future: Send,
{
    pub fn new(service: S) -> Self {
        Self {
            service,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Get the client for `tenant_id`, creating it on first use.
    ///
    /// Concurrent callers asking for the same tenant receive the same instance.
    pub async fn get_or_create_client(&self, tenant_id: &str) -> Arc<DeviceConnectionClient<S>> {
        {
            let clients = self.clients.read().await;
            if let Some(client) = clients.get(tenant_id) {
                return Arc::clone(client);
            }
        }

        let mut clients = self.clients.write().await;
        // Another task may have created the client while we waited for the write lock
        let client = clients.entry(tenant_id.to_string()).or_insert_with(|| {
            debug!(tenant_id = %tenant_id, "creating device connection client");
            Arc::new(DeviceConnectionClient::new(tenant_id, self.service.clone()))
        });

        Arc::clone(client)
    }

    /// Drop the cached client of `tenant_id`, returning whether one existed
    pub async fn remove_client(&self, tenant_id: &str) -> bool {
        self.clients.write().await.remove(tenant_id).is_some()
    }

    pub async fn client_count(&self) -> usize {
        self.clients.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::domain::DomainResult;
    use futures::future::join_all;
    use std::future::{ready, Ready};
    use std::task::{Context, Poll};

    #[derive(Clone)]
    struct NoContent;

    impl Service<ServiceRequest> for NoContent {
        type Response = ServiceResponse;
        type Error = DomainError;
        type Future = Ready<DomainResult<ServiceResponse>>;

        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }

        fn call(&mut self, req: ServiceRequest) -> Self::Future {
            ready(Ok(req.response(204)))
        }
    }

    #[tokio::test]
    async fn test_same_tenant_gets_same_client() {
        let factory = DeviceConnectionClientFactory::new(NoContent);

        let first = factory.get_or_create_client("tenant").await;
        let second = factory.get_or_create_client("tenant").await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.tenant_id(), "tenant");
        assert_eq!(factory.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_tenants_get_separate_clients() {
        let factory = DeviceConnectionClientFactory::new(NoContent);

        let a = factory.get_or_create_client("tenant-a").await;
        let b = factory.get_or_create_client("tenant-b").await;

        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.tenant_id(), "tenant-b");
        assert_eq!(factory.client_count().await, 2);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_instance() {
        let factory = Arc::new(DeviceConnectionClientFactory::new(NoContent));

        let handles = (0..16).map(|_| {
            let factory = Arc::clone(&factory);
            tokio::spawn(async move { factory.get_or_create_client("tenant").await })
        });
        let clients: Vec<_> = join_all(handles)
            .await
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert!(clients.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(factory.client_count().await, 1);
    }

    #[tokio::test]
    async fn test_remove_client() {
        let factory = DeviceConnectionClientFactory::new(NoContent);
        let first = factory.get_or_create_client("tenant").await;

        assert!(factory.remove_client("tenant").await);
        assert!(!factory.remove_client("tenant").await);

        let second = factory.get_or_create_client("tenant").await;
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_created_client_is_usable() {
        let factory = DeviceConnectionClientFactory::new(NoContent);
        let client = factory.get_or_create_client("tenant").await;

        client
            .set_last_known_gateway_for_device("device", "gw-1")
            .await
            .unwrap();
    }
}
