//! Command-line arguments and path prompts

use super::Config;
use crate::executor::DEFAULT_MAX_CONCURRENCY;
use crate::types::SyncError;
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "projsync", version, about = "Sync project folders matched by id prefix")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Copy changed files of every source project into its destination project
    Copy(CopyArgs),
}

#[derive(Debug, Clone, Args)]
pub struct CopyArgs {
    /// Source root (prompted for when omitted)
    #[arg(long, value_name = "DIR")]
    pub from: Option<PathBuf>,

    /// Destination root (prompted for when omitted)
    #[arg(long, value_name = "DIR")]
    pub to: Option<PathBuf>,

    /// Maximum number of files processed at once
    #[arg(short, long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub jobs: usize,

    /// Show what would be copied without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CopyArgs {
    /// Build a validated [`Config`], asking `prompt` for any missing path.
    pub fn into_config<P>(self, mut prompt: P) -> Result<Config, SyncError>
    where
        P: FnMut(&str) -> io::Result<String>,
    {
        let source = require_path(self.from, "from", &mut prompt)?;
        let destination = require_path(self.to, "to", &mut prompt)?;

        let config = Config {
            source,
            destination,
            max_concurrency: self.jobs,
            dry_run: self.dry_run,
            json: self.json,
        };
        config.validate()?;
        Ok(config)
    }
}

impl TryFrom<CopyArgs> for Config {
    type Error = SyncError;

    fn try_from(args: CopyArgs) -> Result<Self, Self::Error> {
        args.into_config(prompt_terminal)
    }
}

/// Ask for a value: the prompt goes to stderr, the answer is one line of stdin.
///
/// Returns an empty string at end of input.
pub fn prompt_terminal(message: &str) -> io::Result<String> {
    let term = console::Term::stderr();
    term.write_str(message)?;
    term.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(answer)
}

fn require_path<P>(
    value: Option<PathBuf>,
    field: &'static str,
    prompt: &mut P,
) -> Result<PathBuf, SyncError>
where
    P: FnMut(&str) -> io::Result<String>,
{
    let raw = match value {
        Some(path) => path,
        None => PathBuf::from(prompt(&format!("{}: ", field))?.trim()),
    };

    if raw.as_os_str().is_empty() {
        return Err(SyncError::MissingInput { field });
    }
    Ok(raw)
}
