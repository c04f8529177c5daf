mod client_factory;
mod device_connection_client;

pub use client_factory::*;
pub use device_connection_client::*;
