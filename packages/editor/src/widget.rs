//! # dict_input
//!
//! The construction call a host makes once per frame for each widget:
//!
//! 1. derive the session identity from `key` (or the label)
//! 2. look up or create the session, resolving the initial value only on
//!    first use
//! 3. dispatch at most one UI event (edit, paste or copy) to it
//! 4. hand back the current value and a [`WidgetFrame`] to draw
//!
//! ```rust,ignore
//! let mut registry = SessionRegistry::new();
//! let options = DictInputOptions::default().locked();
//!
//! let mut widget = dict_input(&mut registry, "Edit me!", template.into(), &options)?;
//! let value = widget.dispatch(WidgetEvent::Edit(text_box_contents), &mut clipboard)?;
//! let frame = widget.frame();
//! ```

use crate::clipboard::Clipboard;
use crate::{EditOutcome, EditSession, EditorResult, InitialValue, PasteError, SessionRegistry};
use dict_input_common::Document;
use serde::Serialize;
use tracing::debug;

/// Prefix of every session identity
pub const IDENTITY_PREFIX: &str = "json_input-";

/// Height of one line of text in the rendered text box
pub const PIXELS_PER_LINE: usize = 27;

/// Per-widget options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictInputOptions {
    /// Freeze key structure and value types to the initial value
    pub structure_locked: bool,

    /// Explicit widget identity; the label is used when absent
    pub key: Option<String>,
}

impl DictInputOptions {
    pub fn locked(mut self) -> Self {
        self.structure_locked = true;
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    fn widget_base<'a>(&'a self, label: &'a str) -> &'a str {
        self.key.as_deref().unwrap_or(label)
    }
}

/// Registry identity for a widget
pub fn session_identity(label: &str, key: Option<&str>) -> String {
    format!("{}{}", IDENTITY_PREFIX, key.unwrap_or(label))
}

/// UI event delivered to a widget in one dispatch cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Current contents of the text box
    Edit(String),
    /// Paste button pressed
    Paste,
    /// Copy button pressed
    Copy,
}

/// Everything the presentation layer needs to draw the widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WidgetFrame {
    pub label: String,

    /// Canonical text for the text box
    pub text: String,

    /// Changes whenever the text box must drop its input buffer
    pub widget_key: String,

    pub height_px: usize,

    /// Revert reason from the last edit, if any
    pub warning: Option<String>,

    pub copy_key: String,
    pub paste_key: String,
}

/// A widget bound to its session for one dispatch cycle
pub struct DictInput<'r> {
    label: String,
    widget_base: String,
    session: &'r mut EditSession,
}

/// Find or create the session behind a widget
///
/// `value` is resolved only when the session does not exist yet, so a
/// callable with a parameter lacking a default fails here, on first use.
pub fn dict_input<'r>(
    registry: &'r mut SessionRegistry,
    label: &str,
    value: InitialValue,
    options: &DictInputOptions,
) -> EditorResult<DictInput<'r>> {
    let identity = session_identity(label, options.key.as_deref());
    let structure_locked = options.structure_locked;

    let session = registry.get_or_create(&identity, || {
        let initial = value.resolve()?;
        Ok(EditSession::new(initial, structure_locked))
    })?;

    Ok(DictInput {
        label: label.to_string(),
        widget_base: options.widget_base(label).to_string(),
        session,
    })
}

impl DictInput<'_> {
    /// Current accepted value
    pub fn value(&self) -> &Document {
        self.session.accepted_value()
    }

    pub fn session(&self) -> &EditSession {
        &*self.session
    }

    /// Forward the text box contents to the session
    pub fn submit_text(&mut self, raw: &str) -> EditOutcome {
        self.session.submit_text(raw)
    }

    /// Paste from `clipboard` into the session
    pub fn paste(&mut self, clipboard: &mut dyn Clipboard) -> Result<Document, PasteError> {
        self.session.paste_from(clipboard)
    }

    /// Copy the accepted value to `clipboard`
    pub fn copy(&self, clipboard: &mut dyn Clipboard) -> EditorResult<String> {
        Ok(self.session.copy_to(clipboard)?)
    }

    /// Handle one UI event and return the value the caller should use
    ///
    /// Text edits never fail (rejections are reverted); paste and clipboard
    /// failures are returned as errors and leave the value unchanged.
    pub fn dispatch(
        &mut self,
        event: WidgetEvent,
        clipboard: &mut dyn Clipboard,
    ) -> EditorResult<Document> {
        debug!(widget = %self.widget_base, ?event, "dispatch");

        match event {
            WidgetEvent::Edit(raw) => Ok(self.submit_text(&raw).value),
            WidgetEvent::Paste => Ok(self.paste(clipboard)?),
            WidgetEvent::Copy => {
                self.session.clear_warning();
                self.copy(clipboard)?;
                Ok(self.value().clone())
            }
        }
    }

    /// Key the text box is rendered under: `{key or label}-{version}`
    pub fn widget_key(&self) -> String {
        format!("{}-{}", self.widget_base, self.session.version())
    }

    pub fn frame(&self) -> WidgetFrame {
        let text = self.session.rendered_text();
        let height_px = text.lines().count() * PIXELS_PER_LINE;

        WidgetFrame {
            label: self.label.clone(),
            widget_key: self.widget_key(),
            height_px,
            warning: self.session.pending_message().map(str::to_string),
            copy_key: format!("{}-copy", self.widget_base),
            paste_key: format!("{}-paste", self.widget_base),
            text,
        }
    }

    /// Release the borrow on the registry, keeping the current value
    pub fn into_value(self) -> Document {
        self.session.accepted_value().clone()
    }
}
