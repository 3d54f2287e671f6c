use crate::game_state::{DEFAULT_TIME_LIMIT, GameConfig};
use clap::Parser;
use std::path::PathBuf;

/// Rapid Wordle: guess as many words as you can before the clock runs out
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seconds on the clock for each game
    #[arg(
        short = 't',
        long = "time-limit",
        default_value_t = DEFAULT_TIME_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub time_limit: u32,

    /// Seed for word selection, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,

    /// Log file location (defaults to the user cache directory)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            time_limit: self.time_limit,
            seed: self.seed,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}
