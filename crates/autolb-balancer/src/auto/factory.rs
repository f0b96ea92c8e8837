use std::sync::Arc;

use autolb_core::error::Result;
use autolb_core::lb::Helper;

use crate::config::{BalancerConfig, BalancerSection};
use crate::obs::BalancerMetrics;
use crate::registry::LoadBalancerRegistry;

use super::balancer::AutoConfiguredLoadBalancer;

/// Builds one [`AutoConfiguredLoadBalancer`] per channel.
/// Construct once at startup, then share via Arc.
pub struct AutoConfiguredLoadBalancerFactory {
    registry: Arc<LoadBalancerRegistry>,
    policies: BalancerSection,
    metrics: Arc<BalancerMetrics>,
}

impl AutoConfiguredLoadBalancerFactory {
    /// Factory with `default_policy` and the stock external-balancer and
    /// fallback policy names.
    pub fn new(registry: Arc<LoadBalancerRegistry>, default_policy: impl Into<String>) -> Self {
        let policies = BalancerSection {
            default_policy: default_policy.into(),
            ..BalancerSection::default()
        };
        Self::with_policies(registry, policies)
    }

    pub fn from_config(cfg: &BalancerConfig, registry: Arc<LoadBalancerRegistry>) -> Self {
        Self::with_policies(registry, cfg.balancer.clone())
    }

    fn with_policies(registry: Arc<LoadBalancerRegistry>, policies: BalancerSection) -> Self {
        Self {
            registry,
            policies,
            metrics: Arc::new(BalancerMetrics::default()),
        }
    }

    pub fn default_policy(&self) -> &str {
        &self.policies.default_policy
    }

    pub fn metrics(&self) -> &Arc<BalancerMetrics> {
        &self.metrics
    }

    /// Fails if the default policy is not registered.
    pub fn new_load_balancer(&self, helper: Arc<dyn Helper>) -> Result<AutoConfiguredLoadBalancer> {
        AutoConfiguredLoadBalancer::new(
            helper,
            self.registry.clone(),
            self.policies.clone(),
            self.metrics.clone(),
        )
    }
}
