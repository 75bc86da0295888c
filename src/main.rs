use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

use explore::{Explorer, Halt};
use grammar::{Grammar, Word};

mod config;
use config::{Cli, Config};

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let grammar = Grammar::from_file(&config.path)
        .with_context(|| format!("loading {}", config.path.display()))?;

    let undeclared = grammar.undeclared_symbols();
    if !undeclared.is_empty() {
        let symbols: String = undeclared.into_iter().collect();
        warn!(%symbols, "symbols in neither alphabet are treated as non-terminals");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let explorer = Explorer::new(&grammar, config.limits());
    let exploration = if config.trace_enabled {
        let mut failed = None;
        let exploration = explorer
            .observe(|parent: &Word, child: &Word, _depth: usize| {
                if failed.is_none() {
                    if let Err(e) = writeln!(out, "{} -> {}", parent, child) {
                        failed = Some(e);
                    }
                }
            })
            .run();
        if let Some(e) = failed {
            return Err(e).context("writing trace");
        }
        exploration
    } else {
        explorer.run()
    };

    match exploration.halt() {
        Halt::WordLimit | Halt::Timeout => warn!(
            halt = %exploration.halt(),
            "exploration stopped early, the result may be incomplete"
        ),
        halt => debug!(%halt, "exploration complete"),
    }

    let words: Vec<&str> = exploration.words().iter().map(Word::as_str).collect();
    writeln!(out, "{:?}", words)?;

    if config.derivations {
        for word in exploration.words() {
            if let Some(chain) = exploration.derivation(word) {
                let steps: Vec<&str> = chain.iter().map(Word::as_str).collect();
                writeln!(out, "{}", steps.join(" -> "))?;
            }
        }
    }
    Ok(())
}
