use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::Rng as _;
use sequence_engine::GameSeed;
use sequence_evaluator::{fitness::DiagonalScan, move_selector::SelectorConfig};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;

use crate::util;

use self::{play::PlayArg, simulate::SimulateArg, snapshot::SnapshotArg};

mod play;
mod simulate;
mod snapshot;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal against computer seats
    Play(#[clap(flatten)] PlayArg),
    /// Run computer-only games and write a JSON summary
    Simulate(#[clap(flatten)] SimulateArg),
    /// Print the starting position of a game as JSON
    Snapshot(#[clap(flatten)] SnapshotArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    util::initialize_logging(args.log_level);
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Snapshot(arg) => snapshot::run(&arg)?,
    }
    Ok(())
}

/// Table settings shared by every mode.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GameArg {
    /// Number of seats: even, from 2 to 12
    #[clap(long, default_value_t = 2)]
    seats: usize,
    /// Seed for the board, the deck and the computer seats, as 32 hex digits
    #[clap(long)]
    seed: Option<GameSeed>,
}

impl Default for GameArg {
    fn default() -> Self {
        Self {
            seats: 2,
            seed: None,
        }
    }
}

impl GameArg {
    /// The given seed, or a fresh random one.
    pub(crate) fn seed(&self) -> GameSeed {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        info!(%seed, "game seed");
        seed
    }
}

/// Settings of the computer seats.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AiArg {
    /// JSON file with the computer seat settings
    #[clap(long)]
    ai_config: Option<PathBuf>,
    /// Generations per move search
    #[clap(long)]
    generations: Option<usize>,
    /// Move searches tried before a seat gives up
    #[clap(long)]
    max_attempts: Option<usize>,
    /// Score the diagonals over the whole square around a cell
    #[clap(long, default_value_t = false)]
    square_diagonals: bool,
}

impl AiArg {
    /// Loads `--ai-config` if given, then applies the flag overrides.
    pub(crate) fn selector_config(&self) -> anyhow::Result<SelectorConfig> {
        let AiArg {
            ai_config,
            generations,
            max_attempts,
            square_diagonals,
        } = self;

        let mut config = match ai_config {
            Some(path) => util::read_selector_config_file(path)?,
            None => SelectorConfig::default(),
        };
        if let Some(generations) = generations {
            config.genetic.generations = *generations;
        }
        if let Some(max_attempts) = max_attempts {
            config.max_attempts = *max_attempts;
        }
        if *square_diagonals {
            config.diagonal_scan = DiagonalScan::Square;
        }
        Ok(config)
    }
}
