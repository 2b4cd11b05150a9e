//! Host-facing per-item types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::ERROR_KEY;

/// One emitted item: a flat string-keyed mapping.
pub type OutputRecord = Map<String, Value>;

/// Which resource/operation the host wants executed for one input item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    pub resource: String,
    pub operation: String,
    pub item_index: usize,
}

impl OperationRequest {
    pub fn new(resource: impl Into<String>, operation: impl Into<String>, item_index: usize) -> Self {
        Self { resource: resource.into(), operation: operation.into(), item_index }
    }
}

/// Uniform shape of any failure, before it is turned into an output record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
}

impl ErrorRecord {
    /// The `{error: message}` record captured under continue-on-fail.
    pub fn into_output(self) -> OutputRecord {
        let mut record = Map::new();
        record.insert(ERROR_KEY.to_string(), Value::String(self.message));
        record
    }
}
