use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Clone)]
#[command(
    display_name = "MMR Simulator",
    long_about = "Simulates a population of players under a matchmaking-rating strategy \
    and reports how quickly the visible ratings converge on the latent skills"
)]
pub struct Args {
    /// Number of players in the simulated population
    #[arg(short, long, default_value_t = 20_000)]
    pub players: usize,

    /// Number of matches to simulate
    #[arg(short, long, default_value_t = 1_000_000)]
    pub games: usize,

    /// Matchmaking strategy to evaluate
    #[arg(
        short,
        long,
        default_value = "elo",
        value_parser = ["naive", "elo", "tweaked_elo", "tweaked2_elo", "gaussian"]
    )]
    pub strategy: String,

    /// Positional strategy parameters, e.g. `--params 2,100,56,0.3` for
    /// tweaked2_elo (k_min, k_base, games_divisor, coef)
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub params: Vec<f64>,

    /// RNG seed; the same seed reproduces the run exactly
    #[arg(long, default_value_t = 0x1234_5678)]
    pub seed: u64,

    /// Probe mode: skip histories and print only the two metric sums
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub probe: bool,

    /// Write the full run output (players, histories, series) as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}
