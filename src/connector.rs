//! Connector trait and protocol messages
//!
//! Defines the Connector trait the source implements, plus the messages,
//! check results and catalog it produces.

use crate::error::Result;
use crate::types::{JsonValue, LogLevel, Record};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::json;

// ============================================================================
// Connector Spec (for UI)
// ============================================================================

/// Connector specification returned by spec()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorSpec {
    /// Connector name
    pub name: String,

    /// Human-readable title
    pub title: String,

    /// Description
    pub description: Option<String>,

    /// JSON schema of the connection configuration
    pub connection_specification: JsonValue,

    /// Documentation URL
    pub documentation_url: Option<String>,
}

// ============================================================================
// Check Result
// ============================================================================

/// Result of a connection check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Available streams, as returned by discover()
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Streams in read order
    pub streams: Vec<CatalogStream>,
}

impl Catalog {
    /// Stream names in read order
    pub fn stream_names(&self) -> Vec<&str> {
        self.streams.iter().map(|s| s.name.as_str()).collect()
    }

    /// Find a stream by name
    pub fn get(&self, name: &str) -> Option<&CatalogStream> {
        self.streams.iter().find(|s| s.name == name)
    }
}

/// One stream in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStream {
    /// Stream name
    pub name: String,

    /// Primary key paths
    pub source_defined_primary_key: Vec<Vec<String>>,

    /// Stream whose records partition this one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_stream: Option<String>,
}

impl CatalogStream {
    /// A stream keyed by `id`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_defined_primary_key: vec![vec!["id".to_string()]],
            parent_stream: None,
        }
    }

    /// Set the parent stream
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_stream = Some(parent.into());
        self
    }
}

// ============================================================================
// Messages
// ============================================================================

/// Messages emitted during read operations
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// One flattened record
    Record {
        /// Stream name
        stream: String,
        /// The record
        record: Record,
        /// Timestamp when the record was emitted
        emitted_at: DateTime<Utc>,
    },

    /// Log message
    Log {
        /// Log level
        level: LogLevel,
        /// Log message
        message: String,
    },
}

impl Message {
    /// Create a record message
    pub fn record(stream: impl Into<String>, record: Record) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            emitted_at: Utc::now(),
        }
    }

    /// Create a log message
    pub fn log(level: LogLevel, message: impl Into<String>) -> Self {
        Self::Log {
            level,
            message: message.into(),
        }
    }

    /// Create a debug log message
    pub fn debug(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Debug, message)
    }

    /// Create an info log message
    pub fn info(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Info, message)
    }

    /// Create an error log message
    pub fn error(message: impl Into<String>) -> Self {
        Self::log(LogLevel::Error, message)
    }

    /// Whether this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// The record, if this is a record message
    pub fn into_record(self) -> Option<Record> {
        match self {
            Self::Record { record, .. } => Some(record),
            Self::Log { .. } => None,
        }
    }

    /// Protocol JSON form, one object per output line
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Record {
                stream,
                record,
                emitted_at,
            } => json!({
                "type": "RECORD",
                "record": {
                    "stream": stream,
                    "data": record.to_json(),
                    "emitted_at": emitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                }
            }),
            Self::Log { level, message } => json!({
                "type": "LOG",
                "log": {
                    "level": level,
                    "message": message,
                }
            }),
        }
    }
}

// ============================================================================
// Connector Trait
// ============================================================================

/// Type alias for the message stream returned by read()
pub type MessageStream = BoxStream<'static, Result<Message>>;

/// Type alias for a stream of bare records
pub type RecordStream = BoxStream<'static, Result<Record>>;

/// Core trait the source implements
#[async_trait]
pub trait Connector: Send + Sync {
    /// Returns the connector specification (for UI/validation)
    fn spec(&self) -> ConnectorSpec;

    /// Tests if credentials and configuration are valid
    async fn check(&self, config: &JsonValue) -> Result<CheckResult>;

    /// Lists available streams
    async fn discover(&self, config: &JsonValue) -> Result<Catalog>;

    /// Reads the named streams in order; an empty selection reads all of them
    ///
    /// Returns a stream of messages (records and logs)
    async fn read(&self, config: &JsonValue, streams: &[String]) -> Result<MessageStream>;
}
