use super::{open_clipboard, read_document, write_canonical, LockArgs};
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dict_input_editor::{Clipboard, EditSession};
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct PasteArgs {
    /// json object file the clipboard contents must match
    pub file: PathBuf,

    #[command(flatten)]
    pub lock: LockArgs,

    /// Write the pasted document back to FILE instead of printing it
    #[arg(short, long)]
    pub write: bool,
}

pub fn paste(args: PasteArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut clipboard = open_clipboard()?;
    paste_with(&args, &config, clipboard.as_mut())
}

fn paste_with(args: &PasteArgs, config: &Config, clipboard: &mut dyn Clipboard) -> Result<()> {
    let mut session = EditSession::new(read_document(&args.file)?, args.lock.resolve(config));

    session.paste_from(clipboard)?;
    emit(&args.file, &session.rendered_text(), args.write)
}

fn emit(file: &Path, text: &str, write: bool) -> Result<()> {
    if write {
        write_canonical(file, text)?;
        println!("{} Pasted into {}", "✓".green(), file.display());
    } else {
        println!("{}", text);
    }
    Ok(())
}
