use super::{open_clipboard, read_document};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dict_input_editor::EditSession;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CopyArgs {
    /// json object file to copy
    pub file: PathBuf,
}

pub fn copy(args: CopyArgs, _cwd: &str) -> Result<()> {
    let session = EditSession::new(read_document(&args.file)?, false);

    let mut clipboard = open_clipboard()?;
    let text = session.copy_to(clipboard.as_mut())?;

    println!(
        "{} Copied {} ({} lines)",
        "✓".green(),
        args.file.display(),
        text.lines().count()
    );

    Ok(())
}
