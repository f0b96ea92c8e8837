//! Top-level facade crate for autolb.
//!
//! Re-exports core contracts and the balancer library so users can depend on a single crate.

pub mod core {
    pub use autolb_core::*;
}

pub mod balancer {
    pub use autolb_balancer::*;
}
