mod context;
mod endpoint;
mod property_bag;
mod topic;

pub use context::{MqttContext, TopicResolver};
pub use endpoint::{EndpointKind, EndpointTable};
pub use property_bag::PropertyBag;
pub use topic::{parse_topic, ParsedTopic};
