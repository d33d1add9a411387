//! Command line configuration.

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Command line configuration for gitssg.
#[derive(Debug, Clone, Parser)]
#[command(name = "gitssg", version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Generation commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate log, files and refs pages for one repository
    Repo {
        /// Repository path
        path: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// Also write the bundled style.css
        #[arg(long)]
        with_style: bool,
    },

    /// Write an index page for several repositories to stdout
    Index {
        /// Repository paths
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,

        /// Abort if any repository cannot be read
        #[arg(long)]
        strict: bool,
    },
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// For `index`, missing paths are only rejected in strict mode; otherwise
    /// they are skipped like any other unreadable repository.
    ///
    /// # Errors
    ///
    /// Returns error if a required repository path does not exist.
    pub fn validate(&self) -> Result<()> {
        match &self.command {
            Command::Repo { path, .. } => {
                if !path.exists() {
                    bail!("Repository path does not exist: {}", path.display());
                }
            }
            Command::Index { paths, strict } => {
                if *strict {
                    if let Some(missing) = paths.iter().find(|p| !p.exists()) {
                        bail!("Repository path does not exist: {}", missing.display());
                    }
                }
            }
        }

        Ok(())
    }

    /// Log level selected by `-v` and `-q`.
    ///
    /// Warnings by default, errors only with `-q`, then info, debug and
    /// trace for each `-v`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
