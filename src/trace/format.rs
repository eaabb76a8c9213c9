//! JSON trace document
//!
//! External trace generators hand this crate a JSON document with an
//! optional `source` field (the traced program text) and a `snapshots`
//! array:
//!
//! ```json
//! {
//!   "source": "console.log(\"hi\");",
//!   "snapshots": [
//!     { "callStack": ["main()"], "variables": {"x": 1},
//!       "output": ["hi"], "line": 1 }
//!   ]
//! }
//! ```
//!
//! The upstream generator emits camelCase, so `callStack` and `call_stack`
//! are both accepted. Missing `call_stack`/`variables`/`output` fields
//! default to empty; `line` is optional. Structural validity beyond JSON
//! shape (non-empty trace, append-only output) is enforced by
//! [`TraceStore::load`](super::TraceStore::load), not here.

use super::value::Value;
use super::{ExecutionSnapshot, TraceError};
use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// One snapshot record as it appears in the document
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotRecord {
    #[serde(default, alias = "callStack")]
    pub call_stack: Vec<String>,
    #[serde(default)]
    pub variables: FxHashMap<String, Value>,
    #[serde(default)]
    pub output: Vec<String>,
    #[serde(default)]
    pub line: Option<usize>,
}

impl From<SnapshotRecord> for ExecutionSnapshot {
    fn from(record: SnapshotRecord) -> Self {
        ExecutionSnapshot {
            call_stack: record.call_stack,
            variables: record.variables,
            output: record.output,
            line: record.line,
        }
    }
}

/// The whole trace interchange document
#[derive(Debug, Clone, Deserialize)]
pub struct TraceDocument {
    #[serde(default)]
    pub source: Option<String>,
    pub snapshots: Vec<SnapshotRecord>,
}

impl TraceDocument {
    /// Parse a document from JSON text
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a document from a file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Split the document into source text and snapshot sequence
    pub fn into_parts(self) -> (Option<String>, Vec<ExecutionSnapshot>) {
        let snapshots = self.snapshots.into_iter().map(Into::into).collect();
        (self.source, snapshots)
    }
}

/// Errors from reading a trace document
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Trace(TraceError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "Failed to read trace file: {}", err),
            LoadError::Json(err) => write!(f, "Failed to parse trace document: {}", err),
            LoadError::Trace(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}

impl From<TraceError> for LoadError {
    fn from(err: TraceError) -> Self {
        LoadError::Trace(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_and_snake_case_records() {
        let json = r#"{
            "snapshots": [
                { "callStack": ["main()"], "variables": {"x": 1}, "output": [] },
                { "call_stack": ["main()", "f()"], "output": ["hi"], "line": 3 }
            ]
        }"#;

        let doc = TraceDocument::from_json(json).expect("parse failed");
        assert!(doc.source.is_none());
        assert_eq!(doc.snapshots.len(), 2);
        assert_eq!(doc.snapshots[0].call_stack, vec!["main()"]);
        assert_eq!(doc.snapshots[1].call_stack, vec!["main()", "f()"]);
        assert_eq!(doc.snapshots[1].line, Some(3));
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let doc = TraceDocument::from_json(r#"{"snapshots": [{}]}"#).expect("parse failed");
        let (source, snapshots) = doc.into_parts();
        assert!(source.is_none());
        assert_eq!(snapshots.len(), 1);
        assert!(snapshots[0].call_stack.is_empty());
        assert!(snapshots[0].variables.is_empty());
        assert!(snapshots[0].output.is_empty());
        assert!(snapshots[0].line.is_none());
    }

    #[test]
    fn rejects_documents_without_a_snapshot_array() {
        let err = TraceDocument::from_json(r#"{"source": "x"}"#).expect_err("parsed");
        assert!(matches!(err, LoadError::Json(_)));

        let err = TraceDocument::from_json("not json").expect_err("parsed");
        assert!(matches!(err, LoadError::Json(_)));
    }
}
