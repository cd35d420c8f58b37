//! Partition router implementations

use super::types::{PartitionKey, PartitionRouter, PartitionStream};
use crate::stream::PaginatedStream;
use futures::{stream, StreamExt, TryStreamExt};

// ============================================================================
// List Router
// ============================================================================

/// Router over a fixed list of parent ids
#[derive(Debug, Clone)]
pub struct ListRouter {
    values: Vec<String>,
    partition_field: String,
}

impl ListRouter {
    /// Create a new list router
    pub fn new(values: Vec<String>, partition_field: impl Into<String>) -> Self {
        Self {
            values,
            partition_field: partition_field.into(),
        }
    }

    /// The configured ids
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl PartitionRouter for ListRouter {
    fn partition_field(&self) -> &str {
        &self.partition_field
    }

    fn partitions(&self) -> PartitionStream {
        let field = self.partition_field.clone();
        let keys: Vec<_> = self
            .values
            .iter()
            .map(|value| Ok(PartitionKey::new(field.clone(), value.clone())))
            .collect();
        stream::iter(keys).boxed()
    }
}

// ============================================================================
// Parent Router
// ============================================================================

/// Router that takes partitions from the ids of a parent stream's records.
///
/// Log messages in the parent's output are skipped. Parent errors end the
/// partition stream.
#[derive(Debug, Clone)]
pub struct ParentRouter {
    parent: PaginatedStream,
    partition_field: String,
}

impl ParentRouter {
    /// Create a new parent router
    pub fn new(parent: PaginatedStream, partition_field: impl Into<String>) -> Self {
        Self {
            parent,
            partition_field: partition_field.into(),
        }
    }
}

impl PartitionRouter for ParentRouter {
    fn partition_field(&self) -> &str {
        &self.partition_field
    }

    fn partitions(&self) -> PartitionStream {
        let field = self.partition_field.clone();
        self.parent
            .records(None)
            .map_ok(move |record| PartitionKey::new(field.clone(), record.id()))
            .boxed()
    }
}
