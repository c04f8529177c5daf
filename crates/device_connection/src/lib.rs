pub mod adapter;
pub mod client;
pub mod domain;

// Re-export mocks when testing feature is enabled
#[cfg(any(test, feature = "testing"))]
pub use domain::MockDeviceConnectionService;
