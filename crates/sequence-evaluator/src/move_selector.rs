//! Move selection for computer seats.
//!
//! [`AiMoveSelector`] binds a [`MoveFitness`] to a fresh genetic search over
//! 8-bit chromosomes, decodes the best one as a cell (clamping each coordinate
//! to the board) and checks it against the rules. An illegal pick throws the
//! whole search away and starts again with a new random population, up to
//! `max_attempts` times.
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use sequence_engine::{Game, GameSeed};
//! use sequence_evaluator::move_selector::{AiMoveSelector, SelectorConfig};
//! use sequence_genetic::GeneticParams;
//!
//! let mut game = Game::with_seed(2, GameSeed::from_bytes([5; 16])).unwrap();
//! let config = SelectorConfig {
//!     genetic: GeneticParams {
//!         generations: 20,
//!         ..GeneticParams::default()
//!     },
//!     ..SelectorConfig::default()
//! };
//! let mut selector = AiMoveSelector::new(config, Pcg32::seed_from_u64(1)).unwrap();
//!
//! let choice = selector.select_move(&game).unwrap();
//! assert!(game.classify(choice.position).legal);
//! game.play_turn(choice.position).unwrap();
//! ```

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use sequence_engine::{Game, Position};
use sequence_genetic::{Chromosome, GeneticParams, GeneticParamsError, Population};
use tracing::debug;

use crate::fitness::{DiagonalScan, FitnessKind, HeuristicFitness, MoveFitness, RandomFitness};

/// Settings of one AI seat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub fitness: FitnessKind,
    pub diagonal_scan: DiagonalScan,
    pub genetic: GeneticParams,
    /// Searches tried before giving up on a turn.
    pub max_attempts: usize,
}

impl SelectorConfig {
    pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

    /// Default settings with the given fitness function.
    #[must_use]
    pub fn with_fitness(fitness: FitnessKind) -> Self {
        Self {
            fitness,
            ..Self::default()
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            fitness: FitnessKind::default(),
            diagonal_scan: DiagonalScan::default(),
            genetic: GeneticParams::default(),
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum NoLegalMoveError {
    #[display("seat {seat} has no legal cell to play")]
    NoLegalCell { seat: usize },
    #[display("seat {seat} found no legal cell after {attempts} searches")]
    AttemptsExhausted { seat: usize, attempts: usize },
}

/// A legal cell picked by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveChoice {
    pub position: Position,
    /// The winning chromosome, before clamping.
    pub chromosome: Chromosome,
    pub fitness: u32,
    /// Searches run, the successful one included.
    pub attempts: usize,
}

/// Picks cells for a computer seat with a genetic search.
#[derive(Debug, Clone)]
pub struct AiMoveSelector {
    config: SelectorConfig,
    rng: Pcg32,
}

impl AiMoveSelector {
    pub fn new(config: SelectorConfig, rng: Pcg32) -> Result<Self, GeneticParamsError> {
        config.genetic.validate()?;
        Ok(Self { config, rng })
    }

    /// Creates a selector whose generator is split off `rng`.
    pub fn from_rng<R>(config: SelectorConfig, rng: &mut R) -> Result<Self, GeneticParamsError>
    where
        R: Rng,
    {
        Self::new(config, Pcg32::from_rng(rng))
    }

    #[must_use]
    pub const fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Searches a legal cell for the seat to play in `game`.
    ///
    /// Fails at once when the seat has no legal cell at all, and after
    /// `max_attempts` searches that all ended on an illegal cell.
    pub fn select_move(&mut self, game: &Game) -> Result<MoveChoice, NoLegalMoveError> {
        let seat = game.current_player();
        if game.legal_moves().is_empty() {
            return Err(NoLegalMoveError::NoLegalCell { seat });
        }
        match self.config.fitness {
            FitnessKind::Heuristic => {
                let fitness = HeuristicFitness::new(self.config.diagonal_scan);
                self.search(game, fitness)
            }
            FitnessKind::Random => {
                let fitness = RandomFitness::new(Pcg32::from_rng(&mut self.rng));
                self.search(game, fitness)
            }
        }
    }

    fn search<M>(&mut self, game: &Game, mut fitness: M) -> Result<MoveChoice, NoLegalMoveError>
    where
        M: MoveFitness,
    {
        let seat = game.current_player();
        for attempt in 1..=self.config.max_attempts {
            let bound = |c: &Chromosome| {
                let (x, y) = c.decode_pair();
                fitness.evaluate_candidate(game, x, y)
            };
            let mut population = Population::random(self.config.genetic, bound, &mut self.rng)
                .expect("genetic parameters are validated on construction");
            let best = population.evolve(&mut self.rng);

            let (x, y) = best.chromosome.decode_pair();
            let position = Position::clamped(x, y);
            let check = game.classify(position);
            debug!(
                seat,
                attempt,
                %position,
                fitness = best.fitness,
                legal = check.legal,
                reason = %check.reason,
                "AI search finished"
            );
            if check.legal {
                return Ok(MoveChoice {
                    position,
                    chromosome: best.chromosome,
                    fitness: best.fitness,
                    attempts: attempt,
                });
            }
        }
        Err(NoLegalMoveError::AttemptsExhausted {
            seat,
            attempts: self.config.max_attempts,
        })
    }
}
