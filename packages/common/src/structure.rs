//! # Structure Comparison
//!
//! Checks a candidate document against a baseline under the structure lock:
//!
//! 1. **Key sets** ([`keys_match`]): identical keys at the root and inside
//!    every nested object, checked from both sides, so an object turning
//!    into a scalar (or back) is caught even when the parent's keys agree.
//! 2. **Value types** ([`value_types_match`]): for every key, the same
//!    [`ValueKind`], recursing into nested objects.
//!
//! Array elements, numeric ranges and cross-field constraints are not
//! inspected.

use crate::document::{Document, ValueKind};
use serde_json::Value;
use std::fmt;

/// Why a candidate failed the structure lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureMismatch {
    /// Key sets differ somewhere in the tree
    Keys,
    /// Same keys, but some value changed kind
    ValueTypes,
}

impl fmt::Display for StructureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureMismatch::Keys => f.write_str("key structure differs"),
            StructureMismatch::ValueTypes => f.write_str("value type differs"),
        }
    }
}

/// True iff both documents have the same keys at every nesting level
pub fn keys_match(a: &Document, b: &Document) -> bool {
    if a.len() != b.len() || !a.keys().all(|key| b.contains_key(key)) {
        return false;
    }

    nested_keys_match(a, b) && nested_keys_match(b, a)
}

/// Every object-valued entry of `a` has an object with matching keys in `b`
fn nested_keys_match(a: &Document, b: &Document) -> bool {
    a.iter().all(|(key, value)| match value {
        Value::Object(nested) => match b.get(key) {
            Some(Value::Object(other)) => keys_match(nested, other),
            _ => false,
        },
        _ => true,
    })
}

/// True iff every value of `a` has the same kind as its counterpart in `b`
///
/// Meant to run after [`keys_match`]; a key of `a` missing from `b` counts
/// as a mismatch.
pub fn value_types_match(a: &Document, b: &Document) -> bool {
    a.iter().all(|(key, value)| {
        let Some(other) = b.get(key) else {
            return false;
        };

        match (value, other) {
            (Value::Object(nested), Value::Object(other)) => value_types_match(nested, other),
            _ => ValueKind::of(value) == ValueKind::of(other),
        }
    })
}

/// Run both checks in order, reporting the first that fails
pub fn check_structure(candidate: &Document, baseline: &Document) -> Result<(), StructureMismatch> {
    if !keys_match(candidate, baseline) {
        return Err(StructureMismatch::Keys);
    }

    if !value_types_match(candidate, baseline) {
        return Err(StructureMismatch::ValueTypes);
    }

    Ok(())
}
