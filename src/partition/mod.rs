//! Partition routing module
//!
//! Supports: Parent stream, List
//!
//! # Overview
//!
//! Child resources such as customer reviews are only reachable through a
//! parent id. A router yields those ids one at a time; the child stream runs
//! its full pagination loop for each before asking for the next.

mod routers;
mod types;

pub use routers::{ListRouter, ParentRouter};
pub use types::{PartitionKey, PartitionRouter, PartitionStream, APP_ID_FIELD};

#[cfg(test)]
mod tests;
