//! # Edit Session
//!
//! Validation-and-revert state machine behind one widget.
//!
//! A session holds the last accepted document and decides, for every
//! incoming edit, whether to accept it:
//!
//! ```text
//! raw text → decode → structure check (if locked) → accept
//!              ↓              ↓
//!           revert ←──────────┘   (text edits)
//!           error                  (pastes)
//! ```
//!
//! ## Text edits
//!
//! A rejected edit is reverted: the rendered text goes back to the accepted
//! value, `version` is bumped so the presentation layer drops its stale
//! input buffer, and the session carries the reason until the next event.
//!
//! ## Pastes
//!
//! A rejected paste leaves everything untouched and is reported as a
//! [`PasteError`] echoing the payload. An accepted paste bumps `version`
//! so the pasted content replaces whatever the text box shows.

use crate::clipboard::{Clipboard, ClipboardError};
use crate::PasteError;
use dict_input_common::{check_structure, decode, encode, CodecError, Document, StructureMismatch};
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, error, info, warn};

/// Why a text edit was reverted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevertReason {
    InvalidJson,
    NotAnObject,
    StructureChanged,
    ValueTypeChanged,
}

impl RevertReason {
    /// User-facing explanation
    pub fn message(self) -> &'static str {
        match self {
            RevertReason::InvalidJson => "The last edit was invalid json and has been reverted",
            RevertReason::NotAnObject => {
                "The last edit was not a json object and has been reverted"
            }
            RevertReason::StructureChanged => {
                "The last edit changed the structure of the json and has been reverted"
            }
            RevertReason::ValueTypeChanged => {
                "The last edit changed the type of an entry and has been reverted"
            }
        }
    }
}

impl fmt::Display for RevertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Session state between events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Rendered text matches the accepted value, nothing to report
    Stable,
    /// The last edit was reverted; the reason is shown until the next
    /// edit, paste or copy
    Reverting(RevertReason),
}

/// Result of a text edit
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// Value the caller should treat as current
    pub value: Document,
    /// Set when the edit was rejected and reverted
    pub reverted: Option<RevertReason>,
}

impl EditOutcome {
    pub fn accepted(&self) -> bool {
        self.reverted.is_none()
    }
}

/// Why a candidate was refused, before it is mapped onto a text or paste failure
#[derive(Debug, Clone, PartialEq)]
enum Rejection {
    Codec(CodecError),
    Structure(StructureMismatch),
}

impl Rejection {
    fn revert_reason(&self) -> RevertReason {
        match self {
            Rejection::Codec(CodecError::Malformed { .. }) => RevertReason::InvalidJson,
            Rejection::Codec(CodecError::NotAnObject { .. }) => RevertReason::NotAnObject,
            Rejection::Structure(StructureMismatch::Keys) => RevertReason::StructureChanged,
            Rejection::Structure(StructureMismatch::ValueTypes) => RevertReason::ValueTypeChanged,
        }
    }

    fn into_paste_error(self, raw: &str) -> PasteError {
        let raw = raw.to_string();
        match self {
            Rejection::Codec(CodecError::Malformed { message, .. }) => {
                PasteError::InvalidJson { message, raw }
            }
            Rejection::Codec(CodecError::NotAnObject { .. }) => PasteError::NotAnObject { raw },
            Rejection::Structure(StructureMismatch::Keys) => PasteError::StructureMismatch { raw },
            Rejection::Structure(StructureMismatch::ValueTypes) => {
                PasteError::TypeMismatch { raw }
            }
        }
    }
}

/// Editing state of one widget
#[derive(Debug, Clone)]
pub struct EditSession {
    /// Last value that passed validation
    accepted_value: Document,

    /// Value currently rendered as text
    display_baseline: Document,

    /// Key set and value types are frozen to the accepted value
    structure_locked: bool,

    /// Bumped whenever the rendered text must be forcibly refreshed
    version: u64,

    state: SessionState,
}

impl EditSession {
    /// Create a session around an already-normalized document
    pub fn new(initial: Document, structure_locked: bool) -> Self {
        Self {
            display_baseline: initial.clone(),
            accepted_value: initial,
            structure_locked,
            version: 0,
            state: SessionState::Stable,
        }
    }

    pub fn accepted_value(&self) -> &Document {
        &self.accepted_value
    }

    pub fn display_baseline(&self) -> &Document {
        &self.display_baseline
    }

    pub fn structure_locked(&self) -> bool {
        self.structure_locked
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Reason for the last revert, if the session is still showing one
    pub fn pending_message(&self) -> Option<&'static str> {
        match self.state {
            SessionState::Stable => None,
            SessionState::Reverting(reason) => Some(reason.message()),
        }
    }

    /// Drop the revert reason left by the last edit
    ///
    /// Value and version are untouched. Paste and copy call this first so a
    /// stale warning is never shown next to their own result.
    pub fn clear_warning(&mut self) {
        self.state = SessionState::Stable;
    }

    /// Canonical text the presentation layer should show
    pub fn rendered_text(&self) -> String {
        encode(&self.display_baseline)
    }

    /// Decode `raw` and check it against the accepted value
    fn screen(&self, raw: &str) -> Result<Document, Rejection> {
        let candidate = decode(raw).map_err(Rejection::Codec)?;

        if self.structure_locked {
            check_structure(&candidate, &self.accepted_value).map_err(Rejection::Structure)?;
        }

        Ok(candidate)
    }

    /// Process the contents of the text box after an edit
    ///
    /// Rejected text is reverted: the accepted value is re-rendered and run
    /// through the same pipeline once more, so at most one revert happens
    /// per call.
    pub fn submit_text(&mut self, raw: &str) -> EditOutcome {
        let mut text = Cow::Borrowed(raw);
        let mut reverted = None;

        loop {
            match self.screen(&text) {
                Ok(candidate) => {
                    if reverted.is_none() {
                        debug!(version = self.version, "edit accepted");
                    }
                    self.display_baseline = candidate.clone();
                    self.accepted_value = candidate;
                    break;
                }
                Err(rejection) if reverted.is_none() => {
                    let reason = rejection.revert_reason();
                    warn!(?rejection, %reason, "reverting edit");

                    self.display_baseline = self.accepted_value.clone();
                    self.version += 1;
                    text = Cow::Owned(self.rendered_text());
                    reverted = Some(reason);
                }
                Err(rejection) => {
                    // The accepted value did not survive its own round trip.
                    error!(?rejection, "accepted value failed revalidation, keeping it");
                    self.display_baseline = self.accepted_value.clone();
                    break;
                }
            }
        }

        self.state = match reverted {
            Some(reason) => SessionState::Reverting(reason),
            None => SessionState::Stable,
        };

        EditOutcome {
            value: self.accepted_value.clone(),
            reverted,
        }
    }

    /// Process pasted text
    ///
    /// On success the pasted document becomes the accepted value and the
    /// rendered text is refreshed. On failure the value and version are
    /// kept; either way any earlier revert reason is dropped.
    pub fn submit_paste(&mut self, raw: &str) -> Result<Document, PasteError> {
        self.clear_warning();

        match self.screen(raw) {
            Ok(candidate) => {
                self.display_baseline = candidate.clone();
                self.accepted_value = candidate.clone();
                self.version += 1;
                info!(version = self.version, "paste accepted");
                Ok(candidate)
            }
            Err(rejection) => {
                warn!(?rejection, "paste rejected");
                Err(rejection.into_paste_error(raw))
            }
        }
    }

    /// Read the clipboard and paste its contents
    pub fn paste_from(&mut self, clipboard: &mut dyn Clipboard) -> Result<Document, PasteError> {
        self.clear_warning();
        let raw = clipboard.paste_text()?;
        self.submit_paste(&raw)
    }

    /// Canonical text of the accepted value, as it would be copied out
    pub fn request_copy(&self) -> String {
        encode(&self.accepted_value)
    }

    /// Copy the accepted value to `clipboard`, returning the copied text
    pub fn copy_to(&self, clipboard: &mut dyn Clipboard) -> Result<String, ClipboardError> {
        let text = self.request_copy();
        clipboard.copy_text(&text)?;
        debug!(bytes = text.len(), "copied to clipboard");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryClipboard, NoClipboard};
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    fn locked_session() -> EditSession {
        EditSession::new(doc(json!({"a": 1, "d": {"a": 3}})), true)
    }

    #[test]
    fn test_session_creation() {
        let session = locked_session();

        assert_eq!(session.version(), 0);
        assert_eq!(session.state(), SessionState::Stable);
        assert_eq!(session.accepted_value(), session.display_baseline());
        assert!(session.structure_locked());
        assert!(session.pending_message().is_none());
    }

    #[test]
    fn test_accepted_edit_does_not_bump_version() {
        let mut session = locked_session();

        let outcome = session.submit_text("{\"a\": 2, \"d\": {\"a\": 4}}");

        assert!(outcome.accepted());
        assert_eq!(outcome.value, doc(json!({"a": 2, "d": {"a": 4}})));
        assert_eq!(session.accepted_value(), &outcome.value);
        assert_eq!(session.display_baseline(), &outcome.value);
        assert_eq!(session.version(), 0);
        assert_eq!(session.state(), SessionState::Stable);
    }

    #[test]
    fn test_invalid_json_reverts() {
        let mut session = locked_session();
        let before = session.accepted_value().clone();

        let outcome = session.submit_text("{\"a\": 2,");

        assert_eq!(outcome.reverted, Some(RevertReason::InvalidJson));
        assert_eq!(outcome.value, before);
        assert_eq!(session.accepted_value(), &before);
        assert_eq!(session.version(), 1);
        assert_eq!(
            session.state(),
            SessionState::Reverting(RevertReason::InvalidJson)
        );
        assert!(session.pending_message().unwrap().contains("invalid json"));
    }

    #[test]
    fn test_structure_change_reverts() {
        let mut session = locked_session();

        let outcome = session.submit_text("{\"a\": 1, \"b\": 2, \"d\": {\"a\": 3}}");

        assert_eq!(outcome.reverted, Some(RevertReason::StructureChanged));
        assert_eq!(session.accepted_value(), &doc(json!({"a": 1, "d": {"a": 3}})));
    }

    #[test]
    fn test_type_change_reverts() {
        let mut session = locked_session();

        let outcome = session.submit_text("{\"a\": \"x\", \"d\": {\"a\": 3}}");

        assert_eq!(outcome.reverted, Some(RevertReason::ValueTypeChanged));
        assert!(outcome.reverted.unwrap().message().contains("type"));
    }

    #[test]
    fn test_non_object_root_reverts() {
        let mut session = locked_session();
        let outcome = session.submit_text("[1, 2, 3]");
        assert_eq!(outcome.reverted, Some(RevertReason::NotAnObject));
    }

    #[test]
    fn test_unlocked_session_accepts_structure_changes() {
        let mut session = EditSession::new(doc(json!({"a": 1})), false);

        let outcome = session.submit_text("{\"b\": \"new\", \"c\": {\"x\": null}}");

        assert!(outcome.accepted());
        assert_eq!(session.accepted_value(), &doc(json!({"b": "new", "c": {"x": null}})));
    }

    #[test]
    fn test_unlocked_session_still_reverts_invalid_json() {
        let mut session = EditSession::new(doc(json!({"a": 1})), false);
        let outcome = session.submit_text("not json");
        assert_eq!(outcome.reverted, Some(RevertReason::InvalidJson));
    }

    #[test]
    fn test_next_accepted_edit_clears_message() {
        let mut session = locked_session();
        session.submit_text("garbage");
        assert!(session.pending_message().is_some());

        let text = session.rendered_text();
        session.submit_text(&text);

        assert_eq!(session.state(), SessionState::Stable);
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_version_only_increases() {
        let mut session = locked_session();
        let mut last = session.version();

        for raw in ["x", "{\"a\": 5, \"d\": {\"a\": 1}}", "{}", "{\"a\": 1.5, \"d\": {\"a\": 1}}"] {
            session.submit_text(raw);
            assert!(session.version() >= last);
            last = session.version();
        }
        assert_eq!(last, 3);
    }

    #[test]
    fn test_paste_accepted_bumps_version() {
        let mut session = locked_session();

        let value = session
            .submit_paste("{\"a\": 9, \"d\": {\"a\": 8}}")
            .unwrap();

        assert_eq!(value, doc(json!({"a": 9, "d": {"a": 8}})));
        assert_eq!(session.accepted_value(), &value);
        assert_eq!(session.display_baseline(), &value);
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_paste_rejection_leaves_session_untouched() {
        let mut session = locked_session();
        let before = session.accepted_value().clone();

        let err = session.submit_paste("{\"a\": \"x\", \"d\": {\"a\": 3}}").unwrap_err();

        assert!(matches!(err, PasteError::TypeMismatch { .. }));
        assert_eq!(err.raw(), Some("{\"a\": \"x\", \"d\": {\"a\": 3}}"));
        assert_eq!(session.accepted_value(), &before);
        assert_eq!(session.version(), 0);
        assert_eq!(session.state(), SessionState::Stable);
    }

    #[test]
    fn test_failed_paste_clears_revert_reason() {
        let mut session = locked_session();
        session.submit_text("nope");
        assert!(session.pending_message().is_some());

        let before = session.accepted_value().clone();
        assert!(session.submit_paste("{\"zzz\": 1}").is_err());

        assert_eq!(session.state(), SessionState::Stable);
        assert!(session.pending_message().is_none());
        assert_eq!(session.accepted_value(), &before);
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_clipboard_failure_clears_revert_reason() {
        let mut session = locked_session();
        session.submit_text("nope");

        assert!(session.paste_from(&mut NoClipboard).is_err());
        assert!(session.pending_message().is_none());
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_paste_error_kinds() {
        let mut session = locked_session();

        assert!(matches!(
            session.submit_paste("{"),
            Err(PasteError::InvalidJson { .. })
        ));
        assert!(matches!(
            session.submit_paste("\"text\""),
            Err(PasteError::NotAnObject { .. })
        ));
        assert!(matches!(
            session.submit_paste("{\"a\": 1}"),
            Err(PasteError::StructureMismatch { .. })
        ));
    }

    #[test]
    fn test_paste_error_echoes_payload() {
        let mut session = locked_session();
        let err = session.submit_paste("{\"zzz\": 1}").unwrap_err();
        assert!(err.to_string().contains("{\"zzz\": 1}"));
        assert!(err.to_string().starts_with("Paste failed"));
    }

    #[test]
    fn test_copy_then_paste_via_clipboard() {
        let mut source = locked_session();
        source.submit_text("{\"a\": 42, \"d\": {\"a\": 3}}");

        let mut clipboard = MemoryClipboard::new();
        let copied = source.copy_to(&mut clipboard).unwrap();
        assert_eq!(copied, source.request_copy());

        let mut target = locked_session();
        let pasted = target.paste_from(&mut clipboard).unwrap();
        assert_eq!(&pasted, source.accepted_value());
    }

    #[test]
    fn test_clipboard_failures_are_reported() {
        let session = locked_session();
        assert!(matches!(
            session.copy_to(&mut NoClipboard),
            Err(ClipboardError::Unavailable(_))
        ));

        let mut session = locked_session();
        assert_eq!(
            session.paste_from(&mut MemoryClipboard::new()),
            Err(PasteError::Clipboard(ClipboardError::Empty))
        );
        assert!(matches!(
            session.paste_from(&mut NoClipboard),
            Err(PasteError::Clipboard(ClipboardError::Unavailable(_)))
        ));
    }

    #[test]
    fn test_rendered_text_is_canonical() {
        let session = EditSession::new(doc(json!({"b": 1, "a": 2})), false);
        assert_eq!(session.rendered_text(), "{\n        \"a\": 2,\n        \"b\": 1\n}");
    }
}
