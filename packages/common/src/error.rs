use crate::document::ValueKind;
use thiserror::Error;

/// Failure to turn text into a [`Document`](crate::Document)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodecError {
    #[error("Malformed json: {message}")]
    Malformed {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Expected a json object at the root, found {found}")]
    NotAnObject { found: ValueKind },
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        CodecError::Malformed {
            message: e.to_string(),
            line: e.line(),
            column: e.column(),
        }
    }
}
