use super::write_canonical;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use dict_input_common::{decode, encode};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct FmtArgs {
    /// json object file to format
    pub file: PathBuf,

    /// Exit with an error if the file is not already canonical
    #[arg(long, conflicts_with = "write")]
    pub check: bool,

    /// Rewrite the file in place instead of printing
    #[arg(short, long)]
    pub write: bool,
}

pub fn fmt(args: FmtArgs, _cwd: &str) -> Result<()> {
    let source = fs::read_to_string(&args.file)
        .map_err(|e| anyhow!("Cannot read {}: {}", args.file.display(), e))?;
    let doc = decode(&source).map_err(|e| anyhow!("{}: {}", args.file.display(), e))?;
    let canonical = encode(&doc);

    if args.check {
        if is_canonical(&source, &canonical) {
            println!("{} {}", "✓".green(), args.file.display());
            Ok(())
        } else {
            Err(anyhow!("{} is not in canonical form", args.file.display()))
        }
    } else if args.write {
        write_canonical(&args.file, &canonical)?;
        println!("{} {}", "✓".green(), args.file.display());
        Ok(())
    } else {
        println!("{}", canonical);
        Ok(())
    }
}

/// Canonical apart from a trailing newline
fn is_canonical(source: &str, canonical: &str) -> bool {
    source.strip_suffix('\n').unwrap_or(source) == canonical
}
