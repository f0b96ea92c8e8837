//! Auto-configured balancer: owns one delegate policy at a time and swaps
//! it as resolution updates change the selected policy.

pub mod balancer;
mod delegate;
pub mod factory;

pub use balancer::AutoConfiguredLoadBalancer;
pub use factory::AutoConfiguredLoadBalancerFactory;
