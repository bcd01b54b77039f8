//! `stocksync` command-line entry point.
//!
//! Run with: `stocksync [--config <file>] <command>`
//!
//! This is an operator tool, so `println!` and `eprintln!` are used for
//! user-facing output; everything else goes through `tracing`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail};
use stocksync_core::ConfigSource;
use stocksync_infra::observability::{init_tracing, LogFormat};
use stocksync_infra::{DefaultConfigSource, FileConfigSource};

mod check;
mod replay;

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct Cli {
    config: Option<PathBuf>,
    command: Command,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Check,
    Replay { events: PathBuf, stock: PathBuf },
    Help,
}

impl Cli {
    fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut config = None;
        let mut positional = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or_else(|| anyhow!("--config needs a file path"))?;
                    config = Some(PathBuf::from(path));
                }
                "--help" | "-h" => positional.insert(0, "help".to_string()),
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            Some("check") => Command::Check,
            Some("replay") => {
                let (Some(events), Some(stock)) = (positional.next(), positional.next()) else {
                    bail!("replay needs <events.jsonl> <stock.json>");
                };
                Command::Replay { events: events.into(), stock: stock.into() }
            }
            Some("help") | None => Command::Help,
            Some(unknown) => bail!("Unknown command: {unknown}"),
        };

        Ok(Self { config, command })
    }

    fn config_source(&self) -> Arc<dyn ConfigSource> {
        match &self.config {
            Some(path) => Arc::new(FileConfigSource::new(path)),
            None => Arc::new(DefaultConfigSource),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is the normal case.
    let _ = dotenvy::dotenv();
    init_tracing(LogFormat::from_env());

    let cli = match Cli::parse(env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("{e}");
            eprintln!();
            print_help();
            return ExitCode::FAILURE;
        }
    };

    let result = match &cli.command {
        Command::Check => check::run(cli.config_source()).await,
        Command::Replay { events, stock } => replay::run(cli.config_source(), events, stock).await,
        Command::Help => {
            print_help();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("stocksync: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("StockSync - InvenTree to Magento stock reconciliation");
    println!();
    println!("USAGE:");
    println!("    stocksync [--config <FILE>] <COMMAND>");
    println!();
    println!("COMMANDS:");
    println!("    check                           Test the Magento URL and token");
    println!("    replay <EVENTS.jsonl> <STOCK.json>");
    println!("                                    Feed recorded stock events through the engine");
    println!("    help                            Show this help message");
    println!();
    println!("Without --config, settings come from STOCKSYNC_* environment variables");
    println!("(a .env file is honoured) or the first stocksync/config .json/.toml found.");
}
