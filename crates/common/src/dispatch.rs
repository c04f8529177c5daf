mod custom_operation;
mod dispatcher;
mod envelope;
mod logging;
mod span;
mod trace_context;

pub use custom_operation::*;
pub use dispatcher::*;
pub use envelope::*;
pub use logging::*;
pub use span::*;
pub use trace_context::*;
