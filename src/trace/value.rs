//! Variable binding values
//!
//! This module defines the [`Value`] enum, the JavaScript-shaped runtime
//! values a trace generator records for variable bindings. Values arrive as
//! plain JSON inside the trace document, so the enum is deserialised
//! untagged: `null` → [`Value::Null`], numbers → [`Value::Number`], and so
//! on.
//!
//! JSON has no `undefined`; generators fold it into `null` (the same
//! collapse `JSON.stringify` performs), so there is no `Undefined` variant.
//!
//! # Display
//!
//! Formatting is JS-flavoured: integral numbers print without a fraction,
//! strings print quoted, arrays and objects print bracketed with their
//! elements inline. Object keys are kept in a [`BTreeMap`] so rendering is
//! deterministic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A recorded variable value at one trace step
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Print a number the way JavaScript does: integral values drop the
/// fraction, everything else uses the shortest float form.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Object(fields) => {
                if fields.is_empty() {
                    return write!(f, "{{}}");
                }
                write!(f, "{{ ")?;
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, " }}")
            }
        }
    }
}
