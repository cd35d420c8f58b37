//! Partition types and traits
//!
//! A partition is one parent id that parameterizes a child request path.

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use futures::stream::BoxStream;

/// Foreign key field carried by child records of an app
pub const APP_ID_FIELD: &str = "app_id";

/// A single partition: the parent id and the field it is exposed as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionKey {
    field: String,
    value: String,
}

impl PartitionKey {
    /// Create a partition key
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Partition key for an app id
    pub fn app(value: impl Into<String>) -> Self {
        Self::new(APP_ID_FIELD, value)
    }

    /// Foreign key field name
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Parent id
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Foreign key object attached to child records
    pub fn foreign_key(&self) -> JsonObject {
        let mut object = JsonObject::new();
        object.insert(self.field.clone(), JsonValue::String(self.value.clone()));
        object
    }
}

/// Stream of partition keys, in parent order
pub type PartitionStream = BoxStream<'static, Result<PartitionKey>>;

/// Trait for partition routers
pub trait PartitionRouter: Send + Sync + std::fmt::Debug {
    /// Field name the partition value is exposed as
    fn partition_field(&self) -> &str;

    /// Lazily produce the partitions. Each call starts over.
    fn partitions(&self) -> PartitionStream;
}
