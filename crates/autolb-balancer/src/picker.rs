//! Pickers published by the auto-configured balancer itself.

use autolb_core::lb::{PickArgs, PickResult, SubchannelPicker};
use autolb_core::Status;

/// Yields no decision: calls wait for the next picker.
/// Published while the delegate is being replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyPicker;

impl SubchannelPicker for EmptyPicker {
    fn pick_subchannel(&self, _args: &PickArgs) -> PickResult {
        PickResult::NoResult
    }
}

/// Fails every call with a fixed status.
/// Published when no policy could be selected.
#[derive(Debug, Clone)]
pub struct FailingPicker {
    failure: Status,
}

impl FailingPicker {
    pub fn new(failure: Status) -> Self {
        Self { failure }
    }

    pub fn failure(&self) -> &Status {
        &self.failure
    }
}

impl SubchannelPicker for FailingPicker {
    fn pick_subchannel(&self, _args: &PickArgs) -> PickResult {
        PickResult::Error(self.failure.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_picker_never_decides() {
        let args = PickArgs { method: "/svc/M".into() };
        assert_eq!(EmptyPicker.pick_subchannel(&args), PickResult::NoResult);
        assert_eq!(EmptyPicker.pick_subchannel(&args), PickResult::NoResult);
    }

    #[test]
    fn failing_picker_returns_fixed_status() {
        let picker = FailingPicker::new(Status::internal("no policy"));
        let args = PickArgs::default();
        for _ in 0..3 {
            assert_eq!(
                picker.pick_subchannel(&args),
                PickResult::Error(Status::internal("no policy"))
            );
        }
    }
}
