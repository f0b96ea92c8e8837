//! autolb core: load-balancing contracts, error types, and status codes.
//!
//! This crate defines the traits and data shared by the channel runtime,
//! concrete policies, and the auto-configured balancer. It carries no
//! runtime dependencies so policies can be built against it alone.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `LbError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod lb;
pub mod status;

/// Shared result type.
pub use error::{ErrorCode, LbError, Result};
pub use status::{Code, ConnectivityState, ConnectivityStateInfo, Status};
