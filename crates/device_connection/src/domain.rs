mod action;
mod connection_result;
mod device_connection_service;

pub use action::*;
pub use connection_result::*;
pub use device_connection_service::*;
