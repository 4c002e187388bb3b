pub mod check;
pub mod copy;
pub mod edit;
pub mod fmt;
pub mod paste;

pub use check::{check, CheckArgs};
pub use copy::{copy, CopyArgs};
pub use edit::{edit, EditArgs};
pub use fmt::{fmt, FmtArgs};
pub use paste::{paste, PasteArgs};

use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use dict_input_common::{decode, Document};
use dict_input_editor::{Clipboard, ClipboardError};
use std::fs;
use std::path::Path;

/// Structure lock flags shared by the editing commands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LockArgs {
    /// Reject edits that change keys or value types
    #[arg(long, conflicts_with = "unlocked")]
    pub locked: bool,

    /// Allow edits to change keys and value types
    #[arg(long)]
    pub unlocked: bool,
}

impl LockArgs {
    /// Flags win over the config file
    pub fn resolve(&self, config: &Config) -> bool {
        if self.locked {
            true
        } else if self.unlocked {
            false
        } else {
            config.structure_locked
        }
    }
}

/// Read and decode a json object file
pub fn read_document(path: &Path) -> Result<Document> {
    let source = fs::read_to_string(path)
        .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;

    decode(&source).map_err(|e| anyhow!("{}: {}", path.display(), e))
}

/// Write canonical text with a trailing newline
pub fn write_canonical(path: &Path, text: &str) -> Result<()> {
    fs::write(path, format!("{}\n", text))
        .map_err(|e| anyhow!("Cannot write {}: {}", path.display(), e))
}

#[cfg(feature = "system-clipboard")]
pub fn open_clipboard() -> Result<Box<dyn Clipboard>, ClipboardError> {
    Ok(Box::new(dict_input_editor::SystemClipboard::new()?))
}

#[cfg(not(feature = "system-clipboard"))]
pub fn open_clipboard() -> Result<Box<dyn Clipboard>, ClipboardError> {
    Ok(Box::new(dict_input_editor::NoClipboard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_flags_override_config() {
        let locked_config = Config::default();
        let unlocked_config = Config {
            structure_locked: false,
            ..Config::default()
        };

        let none = LockArgs::default();
        assert!(none.resolve(&locked_config));
        assert!(!none.resolve(&unlocked_config));

        let locked = LockArgs {
            locked: true,
            unlocked: false,
        };
        assert!(locked.resolve(&unlocked_config));

        let unlocked = LockArgs {
            locked: false,
            unlocked: true,
        };
        assert!(!unlocked.resolve(&locked_config));
    }

    #[test]
    fn test_read_document_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[1, 2]").unwrap();

        let err = read_document(&path).unwrap_err().to_string();
        assert!(err.contains("bad.json"));
        assert!(err.contains("array"));
    }

    #[test]
    fn test_write_canonical_appends_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        write_canonical(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}\n");
    }
}
