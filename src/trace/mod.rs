//! Trace storage and validation
//!
//! An execution trace is an ordered, immutable sequence of
//! [`ExecutionSnapshot`]s produced by an external trace generator. The
//! [`TraceStore`] owns the currently loaded trace, validates it on load, and
//! answers indexed lookups for the playback layer.

pub mod format;
pub mod sample;
pub mod value;

use rustc_hash::FxHashMap;
use std::fmt;
use value::Value;

/// One step of recorded execution state
#[derive(Debug, Clone, Default)]
pub struct ExecutionSnapshot {
    /// Frame labels in call order; the last element is the most recent call
    pub call_stack: Vec<String>,
    /// Variable bindings visible at this step
    pub variables: FxHashMap<String, Value>,
    /// Console output emitted up to and including this step, oldest first
    pub output: Vec<String>,
    /// 1-based source line being executed, when the trace carries source text
    pub line: Option<usize>,
}

/// Errors from loading or indexing a trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The trace was empty or violated the append-only output invariant.
    /// Fatal to that load; the previously loaded trace is retained.
    InvalidTrace { message: String },

    /// Index outside `[0, len)` passed to [`TraceStore::snapshot_at`].
    /// Unreachable through the playback state machine's own bounds guard.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::InvalidTrace { message } => {
                write!(f, "Invalid trace: {}", message)
            }
            TraceError::IndexOutOfRange { index, len } => {
                write!(
                    f,
                    "Snapshot index {} out of range for trace of length {}",
                    index, len
                )
            }
        }
    }
}

impl std::error::Error for TraceError {}

/// Holds the loaded trace and answers lookups
#[derive(Debug, Default)]
pub struct TraceStore {
    snapshots: Vec<ExecutionSnapshot>,
}

impl TraceStore {
    pub fn new() -> Self {
        TraceStore {
            snapshots: Vec::new(),
        }
    }

    /// Replace the current trace.
    ///
    /// Fails with [`TraceError::InvalidTrace`] if `snapshots` is empty or
    /// its output history retracts (console output is append-only across a
    /// trace). On failure the previously loaded trace is left untouched.
    pub fn load(&mut self, snapshots: Vec<ExecutionSnapshot>) -> Result<(), TraceError> {
        validate(&snapshots)?;
        self.snapshots = snapshots;
        Ok(())
    }

    /// Get the snapshot at `index`
    pub fn snapshot_at(&self, index: usize) -> Result<&ExecutionSnapshot, TraceError> {
        self.snapshots
            .get(index)
            .ok_or(TraceError::IndexOutOfRange {
                index,
                len: self.snapshots.len(),
            })
    }

    /// Get the number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Check if no trace is loaded
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// Check the structural invariants a well-formed trace satisfies: at least
/// one snapshot, and every snapshot's output extends the previous one.
fn validate(snapshots: &[ExecutionSnapshot]) -> Result<(), TraceError> {
    if snapshots.is_empty() {
        return Err(TraceError::InvalidTrace {
            message: "trace must contain at least one snapshot".to_string(),
        });
    }

    for (step, pair) in snapshots.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        let retracted = next.output.len() < prev.output.len()
            || next.output[..prev.output.len()] != prev.output[..];
        if retracted {
            return Err(TraceError::InvalidTrace {
                message: format!(
                    "output retracted between steps {} and {}",
                    step,
                    step + 1
                ),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(output: &[&str]) -> ExecutionSnapshot {
        ExecutionSnapshot {
            output: output.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn load_accepts_a_single_snapshot() {
        let mut store = TraceStore::new();
        store.load(vec![snap(&[])]).expect("load failed");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_rejects_an_empty_trace_and_keeps_the_old_one() {
        let mut store = TraceStore::new();
        store.load(vec![snap(&["a"])]).expect("load failed");

        let err = store.load(vec![]).expect_err("empty trace accepted");
        assert!(matches!(err, TraceError::InvalidTrace { .. }));

        // prior trace untouched
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot_at(0).expect("lookup").output, vec!["a"]);
    }

    #[test]
    fn load_rejects_retracted_output() {
        let mut store = TraceStore::new();
        let err = store
            .load(vec![snap(&["a", "b"]), snap(&["a"])])
            .expect_err("shrinking output accepted");
        assert!(matches!(err, TraceError::InvalidTrace { .. }));

        let err = store
            .load(vec![snap(&["a"]), snap(&["x", "y"])])
            .expect_err("rewritten output accepted");
        assert!(matches!(err, TraceError::InvalidTrace { .. }));
    }

    #[test]
    fn load_accepts_monotone_output() {
        let mut store = TraceStore::new();
        store
            .load(vec![snap(&[]), snap(&["a"]), snap(&["a"]), snap(&["a", "b"])])
            .expect("monotone trace rejected");
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn snapshot_at_reports_out_of_range() {
        let mut store = TraceStore::new();
        store
            .load(vec![snap(&[]), snap(&[]), snap(&[])])
            .expect("load failed");

        let err = store.snapshot_at(5).expect_err("index 5 accepted");
        assert_eq!(err, TraceError::IndexOutOfRange { index: 5, len: 3 });
        assert!(store.snapshot_at(2).is_ok());
    }
}
