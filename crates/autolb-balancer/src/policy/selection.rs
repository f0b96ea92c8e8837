use std::sync::Arc;

use serde_json::{Map, Value};

use autolb_core::error::{LbError, Result};
use autolb_core::lb::{AddressGroup, ChannelLogLevel, Helper, LoadBalancerProvider};

use crate::config::BalancerSection;
use crate::obs::BalancerMetrics;
use crate::registry::LoadBalancerRegistry;
use crate::service_config;

/// Outcome of one policy decision. Built per resolution update and dropped
/// once applied.
#[derive(Clone)]
pub struct PolicySelection {
    provider: Arc<dyn LoadBalancerProvider>,
    servers: Vec<AddressGroup>,
    config: Option<Value>,
}

impl PolicySelection {
    pub fn new(provider: Arc<dyn LoadBalancerProvider>, servers: Vec<AddressGroup>, config: Option<Value>) -> Self {
        Self { provider, servers, config }
    }

    pub fn provider(&self) -> &Arc<dyn LoadBalancerProvider> {
        &self.provider
    }

    pub fn policy_name(&self) -> &str {
        self.provider.policy_name()
    }

    pub fn servers(&self) -> &[AddressGroup] {
        &self.servers
    }

    pub fn config(&self) -> Option<&Value> {
        self.config.as_ref()
    }

    pub fn into_servers(self) -> Vec<AddressGroup> {
        self.servers
    }
}

impl std::fmt::Debug for PolicySelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicySelection")
            .field("policy", &self.policy_name())
            .field("servers", &self.servers)
            .field("config", &self.config)
            .finish()
    }
}

/// Whether the "external balancer missing" warning has been emitted for the
/// current run of updates that carry balancer addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FallbackWarning {
    Armed,
    Emitted,
}

/// Decides which policy handles a resolution update.
///
/// In order of preference:
/// 1. the external balancer policy, if any address is a balancer address
///    (or the fallback policy over the plain backends when it is missing)
/// 2. the first registered policy of the service config's list
/// 3. the default policy
pub struct PolicySelector {
    registry: Arc<LoadBalancerRegistry>,
    policies: BalancerSection,
    metrics: Arc<BalancerMetrics>,
    fallback_warning: FallbackWarning,
}

impl PolicySelector {
    pub fn new(registry: Arc<LoadBalancerRegistry>, policies: BalancerSection, metrics: Arc<BalancerMetrics>) -> Self {
        Self {
            registry,
            policies,
            metrics,
            fallback_warning: FallbackWarning::Armed,
        }
    }

    pub fn policies(&self) -> &BalancerSection {
        &self.policies
    }

    pub fn registry(&self) -> &Arc<LoadBalancerRegistry> {
        &self.registry
    }

    pub fn decide(
        &mut self,
        servers: &[AddressGroup],
        service_config: Option<&Map<String, Value>>,
        helper: &dyn Helper,
    ) -> Result<PolicySelection> {
        let (balancers, backends): (Vec<&AddressGroup>, Vec<&AddressGroup>) =
            servers.iter().partition(|g| g.is_balancer());

        if !balancers.is_empty() {
            let backends = backends.into_iter().cloned().collect();
            return self.decide_for_balancer_addresses(servers, backends, helper);
        }
        self.fallback_warning = FallbackWarning::Armed;

        let lb_configs = match service_config {
            Some(sc) => service_config::lb_configs(sc)?,
            None => Vec::new(),
        };
        if !lb_configs.is_empty() {
            let mut tried: Vec<&str> = Vec::new();
            for cfg in &lb_configs {
                let policy = cfg.policy_name();
                if let Some(provider) = self.registry.get_provider(policy) {
                    if !tried.is_empty() {
                        helper.log(
                            ChannelLogLevel::Debug,
                            &format!("[{}] specified by Service Config are not available", tried.join(", ")),
                        );
                    }
                    return Ok(PolicySelection::new(provider, servers.to_vec(), Some(cfg.raw_config().clone())));
                }
                if !tried.contains(&policy) {
                    tried.push(policy);
                }
            }
            return Err(LbError::Selection(format!(
                "None of [{}] specified by Service Config are available.",
                tried.join(", ")
            )));
        }

        let provider = self.provider_or_err(&self.policies.default_policy, "using default policy")?;
        Ok(PolicySelection::new(provider, servers.to_vec(), None))
    }

    fn decide_for_balancer_addresses(
        &mut self,
        servers: &[AddressGroup],
        backends: Vec<AddressGroup>,
        helper: &dyn Helper,
    ) -> Result<PolicySelection> {
        let external = &self.policies.external_balancer_policy;
        if let Some(provider) = self.registry.get_provider(external) {
            self.fallback_warning = FallbackWarning::Armed;
            return Ok(PolicySelection::new(provider, servers.to_vec(), None));
        }

        if backends.is_empty() {
            return Err(LbError::Selection(format!(
                "Received ONLY balancer addresses but {external} runtime is missing"
            )));
        }

        let fallback = &self.policies.fallback_policy;
        if self.fallback_warning == FallbackWarning::Armed {
            self.fallback_warning = FallbackWarning::Emitted;
            let msg = format!(
                "Found balancer addresses but {external} runtime is missing. Will use {fallback}. \
                 Please register a {external} load balancer provider."
            );
            helper.log(ChannelLogLevel::Error, &msg);
            tracing::warn!(external = %external, fallback = %fallback, "{msg}");
            self.metrics.external_balancer_fallbacks.inc(&[]);
        }

        let reason = format!("received balancer addresses but {external} runtime is missing");
        let provider = self.provider_or_err(fallback, &reason)?;
        Ok(PolicySelection::new(provider, backends, None))
    }

    fn provider_or_err(&self, policy: &str, reason: &str) -> Result<Arc<dyn LoadBalancerProvider>> {
        self.registry.get_provider(policy).ok_or_else(|| {
            LbError::Selection(format!(
                "Trying to load '{policy}' because {reason}, but it's unavailable"
            ))
        })
    }
}
