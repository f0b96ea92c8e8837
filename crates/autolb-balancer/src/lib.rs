//! autolb balancer library entry.
//!
//! This crate wires the provider registry, policy selection, and delegate
//! lifecycle into the auto-configured balancer handed to each channel.

pub mod auto;
pub mod config;
pub mod noop;
pub mod obs;
pub mod picker;
pub mod policy;
pub mod registry;
pub mod service_config;

pub use auto::{AutoConfiguredLoadBalancer, AutoConfiguredLoadBalancerFactory};
pub use registry::LoadBalancerRegistry;
