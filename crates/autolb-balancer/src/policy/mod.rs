//! Policy selection.
//!
//! Maps a resolution update (addresses + parsed service config) to the
//! policy that should handle it, without touching any balancer instance.

pub mod selection;

pub use selection::{PolicySelection, PolicySelector};
