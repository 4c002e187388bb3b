//! # dict-input common
//!
//! Leaf building blocks shared by the editor and the CLI:
//!
//! - [`document`]: the [`Document`] value model and its canonical text codec
//! - [`structure`]: key-set and value-type comparison between two documents
//! - [`error`] / [`result`]: codec failures

pub mod document;
pub mod error;
pub mod result;
pub mod structure;

pub use document::*;
pub use error::*;
pub use result::*;
pub use structure::*;
