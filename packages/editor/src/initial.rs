//! # Initial Values
//!
//! A widget starts either from a document or from the defaults of a
//! callable's parameters. The choice is made once, when the session is
//! created; the edit loop only ever sees the resulting [`Document`].
//!
//! ```rust,ignore
//! // fn func(a = 1, b = 2.0, c = "c")
//! let signature = Signature::new("func")
//!     .param("a", 1)
//!     .param("b", 2.0)
//!     .param("c", "c");
//!
//! let doc = InitialValue::from(signature).resolve()?;
//! // {"a": 1, "b": 2.0, "c": "c"}
//! ```

use crate::{EditorError, EditorResult};
use dict_input_common::{normalize, Document, ValueKind};
use serde::Serialize;
use serde_json::Value;

/// Where the first accepted value of a session comes from
#[derive(Debug, Clone, PartialEq)]
pub enum InitialValue {
    Document(Document),
    CallableDefaults(Signature),
}

impl InitialValue {
    /// Initial value from anything that serializes to a json object
    pub fn from_serialize<T: Serialize>(value: &T) -> EditorResult<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(InitialValue::Document(map)),
            other => Err(EditorError::InitialValueNotObject {
                found: ValueKind::of(&other),
            }),
        }
    }

    /// Initial value from the `Default` of a serializable type
    pub fn from_defaults<T: Default + Serialize>() -> EditorResult<Self> {
        Self::from_serialize(&T::default())
    }

    /// Produce the starting document, normalized through the codec
    pub fn resolve(self) -> EditorResult<Document> {
        let doc = match self {
            InitialValue::Document(doc) => doc,
            InitialValue::CallableDefaults(signature) => signature.defaults()?,
        };

        Ok(normalize(&doc)?)
    }
}

impl From<Document> for InitialValue {
    fn from(doc: Document) -> Self {
        InitialValue::Document(doc)
    }
}

impl From<Signature> for InitialValue {
    fn from(signature: Signature) -> Self {
        InitialValue::CallableDefaults(signature)
    }
}

/// One parameter of a callable
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub default: Option<Value>,
}

impl Parameter {
    pub fn with_default(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }
}

/// Parameter list of a callable, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    pub name: String,
    pub parameters: Vec<Parameter>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
        }
    }

    /// Add a parameter with a default value
    pub fn param(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.parameters.push(Parameter::with_default(name, default));
        self
    }

    /// Add a parameter without a default
    pub fn required(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(Parameter::required(name));
        self
    }

    /// Map each parameter name to its default
    ///
    /// Fails on the first parameter that has no default.
    pub fn defaults(&self) -> EditorResult<Document> {
        let mut doc = Document::new();

        for param in &self.parameters {
            let default = param.default.clone().ok_or_else(|| {
                EditorError::CallableDefaultsIncomplete {
                    parameter: param.name.clone(),
                }
            })?;
            doc.insert(param.name.clone(), default);
        }

        Ok(doc)
    }
}

/// Initial document for a callable whose parameters all have defaults
pub fn from_callable_defaults(signature: &Signature) -> EditorResult<Document> {
    InitialValue::CallableDefaults(signature.clone()).resolve()
}
