use std::sync::Arc;

use crate::error::Result;
use crate::status::{ConnectivityState, ConnectivityStateInfo, Status};

use super::address::AddressGroup;
use super::attributes::Attributes;
use super::picker::{Subchannel, SubchannelPicker};

/// Severity of a channel log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChannelLogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

/// Runtime handle given to every balancer.
///
/// All calls happen on the runtime's serialization point; implementations
/// need not be reentrant.
pub trait Helper: Send + Sync {
    /// Publish a new connectivity state and the picker that routes calls in it.
    fn update_balancing_state(&self, state: ConnectivityState, picker: Arc<dyn SubchannelPicker>);

    /// Channel-scoped log, visible to the channel's owner.
    fn log(&self, level: ChannelLogLevel, message: &str);
}

/// A load-balancing policy instance.
///
/// Events are never delivered concurrently. After `shutdown` no further
/// events are delivered.
pub trait LoadBalancer: Send {
    /// New resolution result. Returns `Err` only on a precondition violation
    /// by the caller; routing failures are published through the helper.
    fn handle_resolved_addresses(&mut self, servers: Vec<AddressGroup>, attrs: Attributes) -> Result<()>;

    fn handle_name_resolution_error(&mut self, error: Status);

    fn handle_subchannel_state(&mut self, subchannel: Subchannel, state: ConnectivityStateInfo);

    /// Whether an empty address list may be passed to
    /// `handle_resolved_addresses`. If false, callers turn it into a
    /// resolution error instead.
    fn can_handle_empty_address_list(&self) -> bool {
        false
    }

    fn shutdown(&mut self);
}

/// Named factory for one policy, registered in a provider registry.
pub trait LoadBalancerProvider: Send + Sync {
    /// Registry key, e.g. `pick_first`.
    fn policy_name(&self) -> &str;

    /// Unavailable providers are skipped at registration.
    fn is_available(&self) -> bool {
        true
    }

    /// Among providers with the same name, the highest priority wins.
    fn priority(&self) -> u8 {
        5
    }

    fn new_load_balancer(&self, helper: Arc<dyn Helper>) -> Box<dyn LoadBalancer>;
}
