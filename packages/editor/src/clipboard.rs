//! # Clipboard Bridge
//!
//! Copy and paste go through an injected [`Clipboard`] capability so the
//! session never touches the OS directly.
//!
//! Backends:
//! - [`MemoryClipboard`]: in-process buffer, always available
//! - [`NoClipboard`]: reports [`ClipboardError::Unavailable`] on every call
//! - `SystemClipboard`: the OS clipboard (requires the `system-clipboard` feature)
//!
//! "No clipboard at all", "clipboard is empty" and "the pasted text is not
//! acceptable" are three different failures; only the first two live here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard is empty")]
    Empty,

    #[error("Clipboard error: {0}")]
    Backend(String),
}

/// Text clipboard capability
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Read the clipboard contents
    fn paste_text(&mut self) -> Result<String, ClipboardError>;
}

/// In-process clipboard
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard pre-loaded with `text`
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn paste_text(&mut self) -> Result<String, ClipboardError> {
        match &self.contents {
            Some(text) if !text.is_empty() => Ok(text.clone()),
            _ => Err(ClipboardError::Empty),
        }
    }
}

/// Placeholder for hosts without clipboard access
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

const NO_CLIPBOARD_HINT: &str =
    "no clipboard backend configured (build with the `system-clipboard` feature)";

impl Clipboard for NoClipboard {
    fn copy_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(NO_CLIPBOARD_HINT.to_string()))
    }

    fn paste_text(&mut self) -> Result<String, ClipboardError> {
        Err(ClipboardError::Unavailable(NO_CLIPBOARD_HINT.to_string()))
    }
}

/// OS clipboard
#[cfg(feature = "system-clipboard")]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "system-clipboard")]
impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

#[cfg(feature = "system-clipboard")]
impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner.set_text(text.to_string()).map_err(map_arboard_error)
    }

    fn paste_text(&mut self) -> Result<String, ClipboardError> {
        let text = self.inner.get_text().map_err(map_arboard_error)?;
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        Ok(text)
    }
}

#[cfg(feature = "system-clipboard")]
fn map_arboard_error(e: arboard::Error) -> ClipboardError {
    match e {
        arboard::Error::ContentNotAvailable => ClipboardError::Empty,
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(e.to_string()),
        other => ClipboardError::Backend(other.to_string()),
    }
}
