mod cache_directive;
mod device;
mod result;

pub use cache_directive::*;
pub use device::*;
pub use result::*;
