use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use autolb_core::lb::LoadBalancerProvider;

/// Registry of load-balancing policies keyed by policy name.
///
/// Populated once at startup, then only read by balancers.
#[derive(Default)]
pub struct LoadBalancerRegistry {
    providers: DashMap<String, Arc<dyn LoadBalancerProvider>>,
}

impl LoadBalancerRegistry {
    pub fn new() -> Self {
        Self {
            providers: DashMap::new(),
        }
    }

    /// Register `provider` under its policy name.
    ///
    /// Unavailable providers are skipped. If the name is taken, the provider
    /// with the higher priority stays; on a tie the earlier one stays.
    /// Returns whether `provider` is now the registered one.
    pub fn register(&self, provider: Arc<dyn LoadBalancerProvider>) -> bool {
        let name = provider.policy_name().to_string();
        if !provider.is_available() {
            tracing::debug!(policy = %name, "skipping unavailable load balancer provider");
            return false;
        }

        match self.providers.entry(name) {
            Entry::Occupied(mut e) => {
                if provider.priority() > e.get().priority() {
                    e.insert(provider);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(e) => {
                e.insert(provider);
                true
            }
        }
    }

    pub fn deregister(&self, policy: &str) -> Option<Arc<dyn LoadBalancerProvider>> {
        self.providers.remove(policy).map(|(_, p)| p)
    }

    pub fn get_provider(&self, policy: &str) -> Option<Arc<dyn LoadBalancerProvider>> {
        self.providers.get(policy).map(|e| e.value().clone())
    }

    /// Registered policy names, sorted.
    pub fn registered_policies(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
