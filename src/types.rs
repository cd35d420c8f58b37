//! Common types used throughout the crate
//!
//! This module contains shared type definitions, type aliases,
//! and the flattened [`Record`] every stream produces.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Ordered query parameters. Order and repeated keys are preserved so that
/// server-supplied cursors are replayed exactly.
pub type QueryParams = Vec<(String, String)>;

// ============================================================================
// Record
// ============================================================================

/// One extracted API object, flattened.
///
/// The serialized form is `{"id": ..., <attributes>..., <foreign key>...}`.
/// Fields are private; a record cannot change after it has been built.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    attributes: JsonObject,
    foreign_key: Option<JsonObject>,
}

impl Record {
    /// Create a record from an id and its attributes
    pub fn new(id: impl Into<String>, attributes: JsonObject) -> Self {
        Self {
            id: id.into(),
            attributes,
            foreign_key: None,
        }
    }

    /// Attach a foreign key identifying the parent record
    #[must_use]
    pub fn with_foreign_key(mut self, foreign_key: JsonObject) -> Self {
        self.foreign_key = Some(foreign_key);
        self
    }

    /// Build a record from a raw API object of the form
    /// `{"id": ..., "attributes": {...}}`.
    ///
    /// A missing or non-object `attributes` member yields an empty attribute
    /// map. A missing `id` is a decode error.
    pub fn from_api_object(raw: &JsonValue, foreign_key: Option<JsonObject>) -> Result<Self> {
        let object = raw
            .as_object()
            .ok_or_else(|| Error::decode(format!("Expected a JSON object, got: {raw}")))?;

        let id = match object.get("id") {
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Number(n)) => n.to_string(),
            Some(other) => return Err(Error::decode(format!("Unsupported id value: {other}"))),
            None => return Err(Error::decode("API object is missing 'id'")),
        };

        let attributes = object
            .get("attributes")
            .and_then(JsonValue::as_object)
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            id,
            attributes,
            foreign_key,
        })
    }

    /// The API object's id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Flattened attributes
    pub fn attributes(&self) -> &JsonObject {
        &self.attributes
    }

    /// Foreign key, when the record belongs to a parent record
    pub fn foreign_key(&self) -> Option<&JsonObject> {
        self.foreign_key.as_ref()
    }

    /// Look up a field in the flattened view
    pub fn get(&self, field: &str) -> Option<JsonValue> {
        if field == "id" {
            return Some(JsonValue::String(self.id.clone()));
        }
        self.foreign_key
            .as_ref()
            .and_then(|fk| fk.get(field))
            .or_else(|| self.attributes.get(field))
            .cloned()
    }

    /// Flattened JSON object: id, then attributes, then foreign key fields
    pub fn to_object(&self) -> JsonObject {
        let mut object = JsonObject::new();
        object.insert("id".to_string(), JsonValue::String(self.id.clone()));
        for (key, value) in &self.attributes {
            if key != "id" {
                object.insert(key.clone(), value.clone());
            }
        }
        if let Some(fk) = &self.foreign_key {
            for (key, value) in fk {
                object.insert(key.clone(), value.clone());
            }
        }
        object
    }

    /// Flattened JSON value
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(self.to_object())
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_object().serialize(serializer)
    }
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for connector messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    /// Something went wrong but the read continues
    Warn,
    /// The read is about to stop
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}
