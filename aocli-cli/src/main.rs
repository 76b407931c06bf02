//! aocli - Command-line client for Advent of Code

mod cache;
mod calendar;
mod cli;
mod commands;
mod config;
mod cookie;
mod error;
mod output;

use aocli_client::AocClient;
use calendar::PuzzleDate;
use clap::Parser;
use cli::{Args, Command};
use config::Config;
use error::CliError;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "AOCLI_LOG";

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `AOCLI_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    // Needs neither the session nor the cache
    if let Command::Version = args.command {
        println!("aocli v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = Config::from_args(&args)?;
    let client = AocClient::new()?;
    let today = calendar::today();
    tracing::debug!(cache_dir = %config.cache_dir.display(), %today, "configuration resolved");

    match args.command {
        Command::Fetch { puzzle, refresh } => {
            let date = PuzzleDate::resolve(puzzle, today).ensure_available(today)?;
            commands::fetch(&client, &config, date, refresh)
        }
        Command::FetchAll {
            year,
            days,
            refresh,
        } => {
            let year = year.unwrap_or_else(|| PuzzleDate::default_for(today).year);
            commands::fetch_all(&client, &config, year, days, refresh, today)
        }
        Command::View { puzzle, refresh } => {
            let date = PuzzleDate::resolve(puzzle, today).ensure_available(today)?;
            commands::view(&client, &config, date, refresh)
        }
        Command::Submit {
            part,
            answer,
            puzzle,
        } => {
            let date = PuzzleDate::resolve(puzzle, today).ensure_available(today)?;
            commands::submit(&client, &config, date, part, &answer)
        }
        Command::UpdateCookie => commands::update_cookie(&client, &config),
        Command::CookieStatus => commands::cookie_status(&client, &config),
        Command::Version => Ok(()), // printed above
    }
}
