use std::sync::Arc;

use autolb_core::lb::{LoadBalancer, LoadBalancerProvider};

use crate::noop::NoopLoadBalancer;

/// The single delegate owned by an auto-configured balancer.
///
/// Every transition replaces the whole slot, so the provider and the
/// instance it created never disagree.
pub(crate) enum DelegateSlot {
    /// Shut down; no events are delivered.
    NoDelegate,
    /// A policy instance created by `provider`.
    Active {
        provider: Arc<dyn LoadBalancerProvider>,
        balancer: Box<dyn LoadBalancer>,
    },
    /// Last selection failed; events are swallowed until the next success.
    Failed(NoopLoadBalancer),
}

impl DelegateSlot {
    pub(crate) fn active(provider: Arc<dyn LoadBalancerProvider>, balancer: Box<dyn LoadBalancer>) -> Self {
        DelegateSlot::Active { provider, balancer }
    }

    /// Name of the provider behind the current delegate, if any.
    pub(crate) fn policy_name(&self) -> Option<&str> {
        match self {
            DelegateSlot::Active { provider, .. } => Some(provider.policy_name()),
            DelegateSlot::NoDelegate | DelegateSlot::Failed(_) => None,
        }
    }

    /// Label for logs and metric labels.
    pub(crate) fn label(&self) -> &str {
        match self {
            DelegateSlot::NoDelegate => "none",
            DelegateSlot::Active { provider, .. } => provider.policy_name(),
            DelegateSlot::Failed(_) => "noop",
        }
    }

    pub(crate) fn balancer_mut(&mut self) -> Option<&mut dyn LoadBalancer> {
        match self {
            DelegateSlot::NoDelegate => None,
            DelegateSlot::Active { balancer, .. } => Some(&mut **balancer),
            DelegateSlot::Failed(noop) => Some(noop),
        }
    }

    pub(crate) fn is_failed(&self) -> bool {
        matches!(self, DelegateSlot::Failed(_))
    }

    pub(crate) fn is_shut_down(&self) -> bool {
        matches!(self, DelegateSlot::NoDelegate)
    }

    /// Shut the held instance down. Consumes the slot so it cannot be
    /// shut down twice.
    pub(crate) fn shutdown(self) {
        match self {
            DelegateSlot::NoDelegate => {}
            DelegateSlot::Active { mut balancer, .. } => balancer.shutdown(),
            DelegateSlot::Failed(mut noop) => noop.shutdown(),
        }
    }
}
