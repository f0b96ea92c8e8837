//! Balancer config loader (strict parsing).

pub mod schema;

use std::fs;

use autolb_core::error::{LbError, Result};

pub use schema::{BalancerConfig, BalancerSection};

pub fn load_from_file(path: &str) -> Result<BalancerConfig> {
    let s = fs::read_to_string(path).map_err(|e| LbError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<BalancerConfig> {
    let cfg: BalancerConfig =
        serde_yaml::from_str(s).map_err(|e| LbError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
