//! Immutable key/value bag attached to addresses and resolution results.
//!
//! Values are JSON so that name resolvers can hand over already-parsed
//! service config and policies can receive their raw config unchanged.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// On an [`AddressGroup`](super::AddressGroup): authority of an external
/// load balancer. Its presence flags the group as a balancer address.
pub const ATTR_LB_ADDR_AUTHORITY: &str = "io.grpc.lb.addr-authority";

/// On resolution attributes: parsed service config (JSON object).
pub const ATTR_SERVICE_CONFIG: &str = "io.grpc.name-resolver.service-config";

/// On resolution attributes: raw config of the selected policy. Set only by
/// the auto-configured balancer on its way down to the delegate.
pub const ATTR_LOAD_BALANCING_CONFIG: &str = "io.grpc.lb.config";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    values: BTreeMap<String, Value>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy with `key` set to `value`.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}
