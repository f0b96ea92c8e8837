//! Lightweight in-process metrics (dependency-free).
//!
//! Counters are stored as atomics and rendered in Prometheus text format
//! by whoever owns the channel.

pub mod metrics;

pub use metrics::{BalancerMetrics, CounterVec};
