use super::{read_document, write_canonical, LockArgs};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use dict_input_common::{encode, Document};
use dict_input_editor::EditSession;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

#[derive(Args, Debug)]
pub struct EditArgs {
    /// json object file to edit
    pub file: PathBuf,

    #[command(flatten)]
    pub lock: LockArgs,

    /// Editor command (overrides the config file, $VISUAL and $EDITOR)
    #[arg(short, long)]
    pub editor: Option<String>,
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let editor = args.editor.clone().unwrap_or_else(|| config.editor_command());
    let mut session = EditSession::new(read_document(&args.file)?, args.lock.resolve(&config));

    let scratch = tempfile::Builder::new()
        .prefix("dict-input-")
        .suffix(".json")
        .tempfile()?;

    let accepted = edit_rounds(&mut session, config.max_edit_rounds, |text| {
        fs::write(scratch.path(), text)?;
        launch_editor(&editor, scratch.path())?;
        Ok(fs::read_to_string(scratch.path())?)
    })
    .map_err(|e| anyhow!("{} ({} left unchanged)", e, args.file.display()))?;

    write_canonical(&args.file, &encode(&accepted))?;
    println!("{} Saved {}", "✓".green(), args.file.display());

    Ok(())
}

/// Hand the rendered text to `open` until an edit is accepted
///
/// Each reverted edit reopens on the last accepted value.
fn edit_rounds<F>(session: &mut EditSession, max_rounds: usize, mut open: F) -> Result<Document>
where
    F: FnMut(&str) -> Result<String>,
{
    for round in 1..=max_rounds {
        let edited = open(&session.rendered_text())?;
        let outcome = session.submit_text(&edited);

        match outcome.reverted {
            None => {
                debug!(round, "edit accepted");
                return Ok(outcome.value);
            }
            Some(reason) => {
                eprintln!("{} {}", "⚠".yellow(), reason.message().yellow());
            }
        }
    }

    Err(anyhow!("Gave up after {} reverted edits", max_rounds))
}

fn launch_editor(command: &str, path: &Path) -> Result<()> {
    let path_text = path.to_string_lossy();
    if path_text.starts_with('-') {
        return Err(anyhow!("Invalid editor temp path"));
    }

    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{} {}", command, shell_single_quote(&path_text)))
        .status()
        .map_err(|e| anyhow!("Failed to run editor command `{}`: {}", command, e))?;

    if !status.success() {
        return Err(anyhow!("Editor command failed with status {}", status));
    }
    Ok(())
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}
