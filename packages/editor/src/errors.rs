//! Error types for the editor

use crate::clipboard::ClipboardError;
use dict_input_common::{CodecError, ValueKind};
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Parameter `{parameter}` has no default value")]
    CallableDefaultsIncomplete { parameter: String },

    #[error("Initial value must serialize to a json object, found {found}")]
    InitialValueNotObject { found: ValueKind },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("{0}")]
    Paste(#[from] PasteError),

    #[error("{0}")]
    Clipboard(#[from] ClipboardError),
}

/// A rejected paste
///
/// Unlike a rejected text edit, nothing is reverted: the payload is echoed
/// back so the user can see what was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PasteError {
    #[error("Paste failed: Invalid json {message}: \n\n```\n{raw}\n```")]
    InvalidJson { message: String, raw: String },

    #[error("Paste failed: The pasted json is not an object: \n\n```\n{raw}\n```")]
    NotAnObject { raw: String },

    #[error(
        "Paste failed: The json structure does not match that of the current dictionary \
         (and widget's structure lock is on): \n\n```\n{raw}\n```"
    )]
    StructureMismatch { raw: String },

    #[error(
        "Paste failed: The type of a value does not match that of the current dictionary \
         (and widget's structure lock is on): \n\n```\n{raw}\n```"
    )]
    TypeMismatch { raw: String },

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

impl PasteError {
    /// The rejected payload, if the clipboard was read at all
    pub fn raw(&self) -> Option<&str> {
        match self {
            PasteError::InvalidJson { raw, .. }
            | PasteError::NotAnObject { raw }
            | PasteError::StructureMismatch { raw }
            | PasteError::TypeMismatch { raw } => Some(raw),
            PasteError::Clipboard(_) => None,
        }
    }
}
