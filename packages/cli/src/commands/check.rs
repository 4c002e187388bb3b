use super::{read_document, LockArgs};
use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use dict_input_editor::{dict_input, DictInputOptions, EditOutcome, SessionRegistry};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Baseline json object the candidate must match
    pub baseline: PathBuf,

    /// Candidate text, submitted as a single edit
    pub candidate: PathBuf,

    #[command(flatten)]
    pub lock: LockArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One-line summary
    #[default]
    Text,
    /// The widget frame as json
    Json,
}

pub fn check(args: CheckArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let baseline = read_document(&args.baseline)?;
    let candidate = fs::read_to_string(&args.candidate)
        .map_err(|e| anyhow!("Cannot read {}: {}", args.candidate.display(), e))?;

    let options = DictInputOptions {
        structure_locked: args.lock.resolve(&config),
        key: None,
    };
    let label = args.baseline.display().to_string();

    let mut registry = SessionRegistry::new();
    let mut widget = dict_input(&mut registry, &label, baseline.into(), &options)?;
    let outcome = widget.submit_text(&candidate);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&widget.frame())?),
        OutputFormat::Text => print_outcome(&args.candidate, &outcome),
    }

    match outcome.reverted {
        None => Ok(()),
        Some(reason) => Err(anyhow!("{}", reason)),
    }
}

fn print_outcome(candidate: &Path, outcome: &EditOutcome) {
    match outcome.reverted {
        None => println!(
            "{} {} accepted ({} keys)",
            "✓".green(),
            candidate.display(),
            outcome.value.len()
        ),
        Some(reason) => println!(
            "{} {} {}",
            "✗".red(),
            candidate.display(),
            reason.message().yellow()
        ),
    }
}
