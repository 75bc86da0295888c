use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};

use explore::Limits;

/// Derivation bound used when none is given.
pub const DEFAULT_DEPTH: usize = 20;

/// Enumerate the terminal words of a string-rewriting grammar.
#[derive(Parser, Debug)]
#[command(name = "thue", version, arg_required_else_help = true)]
pub struct Cli {
    /// Path to the grammar file
    #[arg(value_name = "GRAMMAR")]
    pub path: PathBuf,

    /// Maximum number of rewrite steps from the start word
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    pub depth: usize,

    /// Print every parent -> child transition as it is discovered
    #[arg(short, long)]
    pub trace: bool,

    /// Print the derivation of each final word after the result
    #[arg(long)]
    pub derivations: bool,

    /// Stop after recording this many distinct words
    #[arg(long, value_name = "N")]
    pub max_words: Option<usize>,

    /// Stop expanding after this many milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Validated run configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub max_depth: usize,
    pub trace_enabled: bool,
    pub derivations: bool,
    pub max_words: Option<usize>,
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        if cli.depth == 0 {
            bail!("--depth must be at least 1");
        }
        if cli.max_words == Some(0) {
            bail!("--max-words must be at least 1");
        }
        Ok(Config {
            path: cli.path,
            max_depth: cli.depth,
            trace_enabled: cli.trace,
            derivations: cli.derivations,
            max_words: cli.max_words,
            timeout: cli.timeout_ms.map(Duration::from_millis),
        })
    }

    pub fn limits(&self) -> Limits {
        let mut limits = Limits::depth(self.max_depth);
        if let Some(n) = self.max_words {
            limits = limits.with_max_words(n);
        }
        if let Some(timeout) = self.timeout {
            limits = limits.with_timeout(timeout);
        }
        limits
    }
}
