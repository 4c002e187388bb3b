//! # dict-input editor
//!
//! Edit a json object through its text form, reverting any edit that breaks
//! it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ common: Document, canonical codec,          │
//! │         key/type structure comparison       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession state machine           │
//! │  - Accept or revert text edits              │
//! │  - Paste / copy through a Clipboard         │
//! │  - Initial value from a document or from    │
//! │    parameter defaults                       │
//! │  - SessionRegistry keyed by widget identity │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ host: draws WidgetFrame, feeds WidgetEvents │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dict_input_editor::{dict_input, DictInputOptions, SessionRegistry, WidgetEvent};
//!
//! let mut registry = SessionRegistry::new();
//! let options = DictInputOptions::default().locked();
//!
//! let mut widget = dict_input(&mut registry, "Edit me!", template.into(), &options)?;
//!
//! // Text box changed
//! let value = widget.dispatch(WidgetEvent::Edit(text), &mut clipboard)?;
//!
//! // Draw
//! let frame = widget.frame();
//! if let Some(warning) = &frame.warning {
//!     show_warning(warning);
//! }
//! ```

mod clipboard;
mod errors;
mod initial;
mod registry;
mod session;
mod widget;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, NoClipboard};
pub use errors::{EditorError, EditorResult, PasteError};
pub use initial::{from_callable_defaults, InitialValue, Parameter, Signature};
pub use registry::SessionRegistry;
pub use session::{EditOutcome, EditSession, RevertReason, SessionState};
pub use widget::{
    dict_input, session_identity, DictInput, DictInputOptions, WidgetEvent, WidgetFrame,
    IDENTITY_PREFIX, PIXELS_PER_LINE,
};

#[cfg(feature = "system-clipboard")]
pub use clipboard::SystemClipboard;

// Re-export common types for convenience
pub use dict_input_common::{decode, encode, CodecError, Document, ValueKind, INDENT};
