//! Node directory: human-readable node names to RPC addresses.
//!
//! Built once from configuration before serving starts and never mutated,
//! so handlers share it through an `Arc` without locking.

pub mod resolver;

pub use resolver::{NodeDirectory, NodeEntry};
