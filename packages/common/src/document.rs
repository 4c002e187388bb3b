//! # Document Model
//!
//! A [`Document`] is a json object: string keys mapping to null, booleans,
//! numbers, strings, arrays or nested objects.
//!
//! ## Canonical text
//!
//! [`encode`] produces the one text form used both for display and for
//! copying out of the widget:
//!
//! - object keys sorted ascending at every nesting level
//! - 8-space indentation
//! - UTF-8, no trailing newline
//!
//! Keys are sorted while writing, so the output does not depend on whether
//! `serde_json` was built with `preserve_order`.
//!
//! ```text
//! {"b": 2.0, "a": {"y": 1, "x": null}}
//!        ↓ encode
//! {
//!         "a": {
//!                 "x": null,
//!                 "y": 1
//!         },
//!         "b": 2.0
//! }
//! ```

use crate::{CodecError, CommonResult};
use serde::ser::{SerializeMap, SerializeSeq, Serializer};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Number, Value};
use std::fmt;
use std::io;

/// Indentation width of the canonical text form
pub const INDENT: usize = 8;

const INDENT_BYTES: &[u8; INDENT] = b"        ";

/// Editable nested key-value structure
pub type Document = Map<String, Value>;

/// Runtime type of a json value, as compared by the structure lock
///
/// Integers and floats are distinct kinds: `1` and `1.0` do not match.
/// A number is a float only when its literal has a fraction or exponent,
/// so `-0` and integers of any width are integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(n) if is_float_literal(n) => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

fn is_float_literal(n: &Number) -> bool {
    n.to_string().contains(&['.', 'e', 'E'][..])
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Encode a document to its canonical text
pub fn encode(doc: &Document) -> String {
    Canonical(doc).to_string()
}

/// Decode text into a document
///
/// Unparseable text is [`CodecError::Malformed`]; well-formed json whose
/// root is not an object is [`CodecError::NotAnObject`].
pub fn decode(text: &str) -> CommonResult<Document> {
    let value: Value = serde_json::from_str(text)?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(CodecError::NotAnObject {
            found: ValueKind::of(&other),
        }),
    }
}

/// Pass a document through the codec once
///
/// Collapses anything the text form cannot tell apart, so the result
/// compares equal to what a later `decode` of the displayed text yields.
pub fn normalize(doc: &Document) -> CommonResult<Document> {
    decode(&encode(doc))
}

/// Count the lines of the canonical text of `doc`
pub fn line_count(doc: &Document) -> usize {
    encode(doc).lines().count()
}

/// Display adapter writing the canonical text of a document
pub struct Canonical<'a>(pub &'a Document);

impl fmt::Display for Canonical<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = FormatterWriter { inner: f };
        let formatter = PrettyFormatter::with_indent(INDENT_BYTES);
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);

        SortedObject(self.0)
            .serialize(&mut ser)
            .map_err(|_| fmt::Error)
    }
}

/// Bridges `io::Write` (what serde_json writes to) onto a `fmt::Formatter`
struct FormatterWriter<'a, 'b> {
    inner: &'a mut fmt::Formatter<'b>,
}

impl io::Write for FormatterWriter<'_, '_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // serde_json only splits output at char boundaries
        let s = std::str::from_utf8(buf)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.inner
            .write_str(s)
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "formatter error"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct SortedObject<'a>(&'a Map<String, Value>);

impl Serialize for SortedObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut entries: Vec<(&String, &Value)> = self.0.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries {
            map.serialize_entry(key, &Sorted(value))?;
        }
        map.end()
    }
}

struct Sorted<'a>(&'a Value);

impl Serialize for Sorted<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => SortedObject(map).serialize(serializer),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Sorted(item))?;
                }
                seq.end()
            }
            scalar => scalar.serialize(serializer),
        }
    }
}
