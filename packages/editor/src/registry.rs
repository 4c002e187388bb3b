//! # Session Registry
//!
//! Maps widget identities to their [`EditSession`]s for the lifetime of the
//! hosting application. The host owns the registry and passes it in; there
//! is no global instance.
//!
//! Look-up-or-create is the only mutation. Fetching an identity that
//! already exists returns the live session untouched: the initial value
//! and lock setting given on later calls are ignored.

use crate::{EditSession, EditorResult};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::info;

#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, EditSession>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the session for `identity`, building it with `create` on first use
    ///
    /// `create` runs at most once per identity; if it fails nothing is stored.
    pub fn get_or_create<F>(&mut self, identity: &str, create: F) -> EditorResult<&mut EditSession>
    where
        F: FnOnce() -> EditorResult<EditSession>,
    {
        match self.sessions.entry(identity.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let session = create()?;
                info!(identity, locked = session.structure_locked(), "session created");
                Ok(entry.insert(session))
            }
        }
    }

    pub fn get(&self, identity: &str) -> Option<&EditSession> {
        self.sessions.get(identity)
    }

    pub fn get_mut(&mut self, identity: &str) -> Option<&mut EditSession> {
        self.sessions.get_mut(identity)
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.sessions.contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Identities of all live sessions, in no particular order
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        self.sessions.keys().map(String::as_str)
    }
}
