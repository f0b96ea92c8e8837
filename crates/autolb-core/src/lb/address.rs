use std::fmt;
use std::net::SocketAddr;

use super::attributes::{Attributes, ATTR_LB_ADDR_AUTHORITY};

/// A group of addresses that are considered equivalent when connecting,
/// plus attributes supplied by the name resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressGroup {
    addrs: Vec<SocketAddr>,
    attrs: Attributes,
}

impl AddressGroup {
    pub fn new(addrs: Vec<SocketAddr>) -> Self {
        Self { addrs, attrs: Attributes::new() }
    }

    pub fn single(addr: SocketAddr) -> Self {
        Self::new(vec![addr])
    }

    pub fn with_attributes(mut self, attrs: Attributes) -> Self {
        self.attrs = attrs;
        self
    }

    /// Flag this group as an external load balancer reachable under `authority`.
    pub fn balancer(addr: SocketAddr, authority: &str) -> Self {
        Self::single(addr).with_attributes(Attributes::new().with(ATTR_LB_ADDR_AUTHORITY, authority))
    }

    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attrs
    }

    pub fn is_balancer(&self) -> bool {
        self.attrs.contains(ATTR_LB_ADDR_AUTHORITY)
    }
}

impl fmt::Display for AddressGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, a) in self.addrs.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{a}")?;
        }
        write!(f, "/{}]", self.attrs)
    }
}

/// Render a resolved address list for log and status messages.
pub fn display_groups(groups: &[AddressGroup]) -> String {
    let parts: Vec<String> = groups.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
