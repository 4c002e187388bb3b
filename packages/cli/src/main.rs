mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, copy, edit, fmt, paste, CheckArgs, CopyArgs, EditArgs, FmtArgs, PasteArgs};
use tracing_subscriber::EnvFilter;

/// dict-input - edit json objects without breaking their structure
#[derive(Parser, Debug)]
#[command(name = "dict-input")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log session events (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a json object in canonical form
    Fmt(FmtArgs),

    /// Submit a candidate file as one edit against a baseline
    Check(CheckArgs),

    /// Edit a json object in $EDITOR, reverting invalid edits
    Edit(EditArgs),

    /// Copy a json object to the system clipboard
    Copy(CopyArgs),

    /// Paste the system clipboard over a json object
    Paste(PasteArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?.display().to_string();

    match cli.command {
        Command::Fmt(args) => fmt(args, &cwd),
        Command::Check(args) => check(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
        Command::Copy(args) => copy(args, &cwd),
        Command::Paste(args) => paste(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_with_lock_flags() {
        let cli = Cli::try_parse_from(["dict-input", "check", "a.json", "b.json", "--unlocked"]).unwrap();
        match cli.command {
            Command::Check(args) => {
                assert!(args.lock.unlocked);
                assert!(!args.lock.locked);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_format() {
        let cli =
            Cli::try_parse_from(["dict-input", "check", "a.json", "b.json", "--format", "json"]).unwrap();
        match cli.command {
            Command::Check(args) => assert_eq!(args.format, commands::check::OutputFormat::Json),
            other => panic!("unexpected command: {:?}", other),
        }

        let result = Cli::try_parse_from(["dict-input", "check", "a.json", "b.json", "-f", "jsn"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_lock_flags_conflict() {
        let result = Cli::try_parse_from([
            "dict-input", "paste", "a.json", "--locked", "--unlocked",
        ]);
        assert!(result.is_err());
    }
}
