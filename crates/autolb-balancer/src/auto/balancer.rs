use std::mem;
use std::sync::Arc;

use autolb_core::error::{LbError, Result};
use autolb_core::lb::{
    display_groups, AddressGroup, Attributes, ChannelLogLevel, Helper, LoadBalancer, Subchannel,
    ATTR_LOAD_BALANCING_CONFIG,
};
use autolb_core::{ConnectivityState, ConnectivityStateInfo, Status};

use crate::config::BalancerSection;
use crate::noop::NoopLoadBalancer;
use crate::obs::BalancerMetrics;
use crate::picker::{EmptyPicker, FailingPicker};
use crate::policy::{PolicySelection, PolicySelector};
use crate::registry::LoadBalancerRegistry;
use crate::service_config::service_config_from_attributes;

use super::delegate::DelegateSlot;

/// Balancer that picks its delegate policy from each resolution update.
///
/// Must be driven from the channel's serialization point: no two events
/// are delivered concurrently.
pub struct AutoConfiguredLoadBalancer {
    helper: Arc<dyn Helper>,
    selector: PolicySelector,
    metrics: Arc<BalancerMetrics>,
    slot: DelegateSlot,
}

impl AutoConfiguredLoadBalancer {
    /// Start with the default policy. Fails if it is not registered.
    pub fn new(
        helper: Arc<dyn Helper>,
        registry: Arc<LoadBalancerRegistry>,
        policies: BalancerSection,
        metrics: Arc<BalancerMetrics>,
    ) -> Result<Self> {
        let provider = registry
            .get_provider(&policies.default_policy)
            .ok_or_else(|| LbError::PolicyNotFound(policies.default_policy.clone()))?;
        let balancer = provider.new_load_balancer(helper.clone());

        Ok(Self {
            helper,
            selector: PolicySelector::new(registry, policies, metrics.clone()),
            metrics,
            slot: DelegateSlot::active(provider, balancer),
        })
    }

    /// Policy name of the current delegate. `None` after a failed selection
    /// or after shutdown.
    pub fn delegate_policy_name(&self) -> Option<&str> {
        self.slot.policy_name()
    }

    /// Whether the last selection failed and the no-op delegate is installed.
    pub fn is_failed(&self) -> bool {
        self.slot.is_failed()
    }

    pub fn is_shut_down(&self) -> bool {
        self.slot.is_shut_down()
    }

    /// Install the selected policy unless the current delegate already
    /// comes from a provider with the same name.
    fn apply(&mut self, selection: &PolicySelection) {
        let new_name = selection.policy_name();
        if self.slot.policy_name() == Some(new_name) {
            return;
        }

        self.helper
            .update_balancing_state(ConnectivityState::Connecting, Arc::new(EmptyPicker));

        let old = mem::replace(&mut self.slot, DelegateSlot::NoDelegate);
        let old_label = old.label().to_string();
        old.shutdown();

        let balancer = selection.provider().new_load_balancer(self.helper.clone());
        self.slot = DelegateSlot::active(selection.provider().clone(), balancer);

        self.helper.log(
            ChannelLogLevel::Info,
            &format!("Load balancer changed from {old_label} to {new_name}"),
        );
        self.metrics
            .policy_switches
            .inc(&[("from", old_label.as_str()), ("to", new_name)]);
        tracing::debug!(from = %old_label, to = %new_name, "load balancer changed");
    }

    /// Publish a failing picker and park on the no-op delegate.
    fn fail_selection(&mut self, err: LbError) {
        tracing::debug!(code = err.code().as_str(), error = %err, "load balancer selection failed");
        self.metrics
            .selection_failures
            .inc(&[("code", err.code().as_str())]);

        let status = Status::internal(err.to_string());
        self.helper.update_balancing_state(
            ConnectivityState::TransientFailure,
            Arc::new(FailingPicker::new(status)),
        );

        let old = mem::replace(&mut self.slot, DelegateSlot::Failed(NoopLoadBalancer));
        old.shutdown();
    }
}

impl LoadBalancer for AutoConfiguredLoadBalancer {
    fn handle_resolved_addresses(&mut self, servers: Vec<AddressGroup>, attrs: Attributes) -> Result<()> {
        if let Some(v) = attrs.get(ATTR_LOAD_BALANCING_CONFIG) {
            return Err(LbError::UnexpectedAttribute {
                key: ATTR_LOAD_BALANCING_CONFIG,
                value: v.to_string(),
            });
        }
        if self.slot.is_shut_down() {
            tracing::warn!(servers = servers.len(), "resolved addresses after shutdown; ignoring");
            return Ok(());
        }

        let decided = service_config_from_attributes(&attrs)
            .and_then(|sc| self.selector.decide(&servers, sc, self.helper.as_ref()));
        let selection = match decided {
            Ok(selection) => selection,
            Err(e) => {
                self.fail_selection(e);
                return Ok(());
            }
        };

        self.apply(&selection);

        let attrs = match selection.config() {
            Some(config) => {
                self.helper
                    .log(ChannelLogLevel::Debug, &format!("Load-balancing config: {config}"));
                attrs.with(ATTR_LOAD_BALANCING_CONFIG, config.clone())
            }
            None => attrs,
        };

        let policy = selection.policy_name().to_string();
        let Some(delegate) = self.slot.balancer_mut() else {
            return Ok(());
        };
        if selection.servers().is_empty() && !delegate.can_handle_empty_address_list() {
            self.metrics
                .empty_address_errors
                .inc(&[("policy", policy.as_str())]);
            delegate.handle_name_resolution_error(Status::unavailable(format!(
                "Name resolver returned no usable address. addrs={}, attrs={}",
                display_groups(&servers),
                attrs
            )));
            Ok(())
        } else {
            delegate.handle_resolved_addresses(selection.into_servers(), attrs)
        }
    }

    fn handle_name_resolution_error(&mut self, error: Status) {
        match self.slot.balancer_mut() {
            Some(delegate) => delegate.handle_name_resolution_error(error),
            None => tracing::warn!(%error, "name resolution error after shutdown; ignoring"),
        }
    }

    fn handle_subchannel_state(&mut self, subchannel: Subchannel, state: ConnectivityStateInfo) {
        match self.slot.balancer_mut() {
            Some(delegate) => delegate.handle_subchannel_state(subchannel, state),
            None => tracing::warn!(
                subchannel = subchannel.id(),
                state = ?state.state,
                "subchannel state after shutdown; ignoring"
            ),
        }
    }

    /// Always true: empty lists are checked here against the delegate.
    fn can_handle_empty_address_list(&self) -> bool {
        true
    }

    fn shutdown(&mut self) {
        let old = mem::replace(&mut self.slot, DelegateSlot::NoDelegate);
        if old.is_shut_down() {
            tracing::debug!("auto-configured load balancer already shut down");
        }
        old.shutdown();
    }
}
