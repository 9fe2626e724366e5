//! Typed output of a download invocation, surfaced to the engine as named
//! output values.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Output fields common to every object-level operation in this task family,
/// embedded by value into each operation's result.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectOutput {
    /// Entity tag reported by the store for the retrieved revision.
    pub e_tag: Option<String>,
    /// Version of the object that was actually served.
    pub version_id: Option<String>,
}

/// The result of one successful download.  Produced exactly once per
/// invocation and owned by the caller thereafter.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResult {
    /// URI of the committed artifact holding the object body.
    pub uri: String,
    /// Size of the body in bytes, as observed during spooling.
    pub content_length: u64,
    /// MIME type describing the format of the object data.
    pub content_type: Option<String>,
    /// User metadata stored with the object.
    pub metadata: HashMap<String, String>,
    #[serde(flatten)]
    pub object: ObjectOutput,
}

impl DownloadResult {
    /// The result as a flat map of named output values, the shape the engine
    /// exposes to downstream tasks.
    pub fn output_values(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            other => unreachable!("DownloadResult serializes to an object, got {:?}", other),
        }
    }
}
