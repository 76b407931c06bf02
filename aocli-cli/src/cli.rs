//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Advent of Code command-line client
#[derive(Parser, Debug)]
#[command(
    name = "aocli",
    about = "Fetch, read and answer Advent of Code puzzles",
    version
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Cache directory for inputs, problems and the session cookie
    #[arg(long, global = true, default_value = "~/.cache/aocli")]
    pub cache_dir: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Puzzle selection shared by the per-day commands
#[derive(clap::Args, Debug, Clone, Copy, Default)]
pub struct PuzzleArgs {
    /// Puzzle day (defaults to today in December, day 1 otherwise)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Puzzle year (defaults to the current year)
    #[arg(value_parser = clap::value_parser!(u16).range(2015..))]
    pub year: Option<u16>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch puzzle input
    Fetch {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Force refresh cached content
        #[arg(short = 'f', long)]
        refresh: bool,
    },

    /// Fetch the inputs of several days in parallel
    FetchAll {
        /// Puzzle year (defaults to the current year)
        #[arg(value_parser = clap::value_parser!(u16).range(2015..))]
        year: Option<u16>,

        /// Days to fetch (comma-separated, all released days if omitted)
        #[arg(short, long, value_delimiter = ',', value_parser = clap::value_parser!(u8).range(1..=25))]
        days: Vec<u8>,

        /// Force refresh cached content
        #[arg(short = 'f', long)]
        refresh: bool,
    },

    /// View puzzle description
    View {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Force refresh cached content
        #[arg(short = 'f', long)]
        refresh: bool,
    },

    /// Submit puzzle answer
    Submit {
        /// Puzzle part (1 or 2)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
        part: u8,

        /// Your answer
        answer: String,

        #[command(flatten)]
        puzzle: PuzzleArgs,
    },

    /// Update the stored session cookie
    UpdateCookie,

    /// Check session cookie validity
    CookieStatus,

    /// Print version information
    Version,
}
