use autolb_core::lb::{AddressGroup, Attributes, LoadBalancer, Subchannel};
use autolb_core::{ConnectivityStateInfo, Result, Status};

/// Placeholder delegate that swallows every event.
///
/// Installed after a failed policy selection until the next successful one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLoadBalancer;

impl LoadBalancer for NoopLoadBalancer {
    fn handle_resolved_addresses(&mut self, _servers: Vec<AddressGroup>, _attrs: Attributes) -> Result<()> {
        Ok(())
    }

    fn handle_name_resolution_error(&mut self, _error: Status) {}

    fn handle_subchannel_state(&mut self, _subchannel: Subchannel, _state: ConnectivityStateInfo) {}

    fn shutdown(&mut self) {}
}
