use std::fmt;

use crate::status::Status;

/// Opaque handle to one logical connection managed by the channel runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subchannel {
    id: u64,
}

impl Subchannel {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Per-call inputs for a pick.
#[derive(Debug, Clone, Default)]
pub struct PickArgs {
    /// Fully qualified method name, e.g. `/pkg.Service/Method`.
    pub method: String,
}

/// Outcome of a single pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
    /// Route the call to this connection.
    Complete(Subchannel),
    /// No decision yet; the call waits for the next picker.
    NoResult,
    /// Fail the call with this status.
    Error(Status),
}

/// Routing behavior published to the runtime together with a connectivity state.
pub trait SubchannelPicker: Send + Sync + fmt::Debug {
    fn pick_subchannel(&self, args: &PickArgs) -> PickResult;
}
