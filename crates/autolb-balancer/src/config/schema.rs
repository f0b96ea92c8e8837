use serde::Deserialize;
use autolb_core::error::{LbError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BalancerConfig {
    pub version: u32,

    #[serde(default)]
    pub balancer: BalancerSection,
}

impl BalancerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LbError::UnsupportedVersion);
        }
        self.balancer.validate()
    }
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            balancer: BalancerSection::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BalancerSection {
    /// Policy used when neither balancer addresses nor service config decide.
    #[serde(default = "default_policy")]
    pub default_policy: String,

    /// Policy selected whenever a resolved address is an external balancer.
    #[serde(default = "default_external_balancer_policy")]
    pub external_balancer_policy: String,

    /// Policy used over the plain backends when the external balancer
    /// policy is not registered.
    #[serde(default = "default_fallback_policy")]
    pub fallback_policy: String,
}

impl Default for BalancerSection {
    fn default() -> Self {
        Self {
            default_policy: default_policy(),
            external_balancer_policy: default_external_balancer_policy(),
            fallback_policy: default_fallback_policy(),
        }
    }
}

impl BalancerSection {
    pub fn validate(&self) -> Result<()> {
        check_policy_name("balancer.default_policy", &self.default_policy)?;
        check_policy_name("balancer.external_balancer_policy", &self.external_balancer_policy)?;
        check_policy_name("balancer.fallback_policy", &self.fallback_policy)?;
        if self.fallback_policy == self.external_balancer_policy {
            return Err(LbError::Config(
                "balancer.fallback_policy must differ from external_balancer_policy".into(),
            ));
        }
        Ok(())
    }
}

fn check_policy_name(field: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(LbError::Config(format!("{field} must not be empty")));
    }
    let ok = name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    if !ok {
        return Err(LbError::Config(format!(
            "{field} must match [a-z0-9_]+ (got {name:?})"
        )));
    }
    Ok(())
}

fn default_policy() -> String {
    "pick_first".into()
}
fn default_external_balancer_policy() -> String {
    "grpclb".into()
}
fn default_fallback_policy() -> String {
    "round_robin".into()
}
