//! Load-balancing contracts shared by the channel runtime and policies.
//!
//! - `address`: resolved address groups
//! - `attributes`: key/value bags and well-known keys
//! - `balancer`: policy, provider, and runtime-handle traits
//! - `picker`: per-call routing behavior

pub mod address;
pub mod attributes;
pub mod balancer;
pub mod picker;

pub use address::{display_groups, AddressGroup};
pub use attributes::{Attributes, ATTR_LB_ADDR_AUTHORITY, ATTR_LOAD_BALANCING_CONFIG, ATTR_SERVICE_CONFIG};
pub use balancer::{ChannelLogLevel, Helper, LoadBalancer, LoadBalancerProvider};
pub use picker::{PickArgs, PickResult, Subchannel, SubchannelPicker};
