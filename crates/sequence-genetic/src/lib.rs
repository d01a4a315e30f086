//! Genetic search over fixed-length bit genomes.
//!
//! The crate knows nothing about the game: it evolves [`Chromosome`]s under any
//! [`Fitness`] function and reports the best one it has seen. The AI in
//! `sequence-evaluator` binds a board-reading fitness to it and decodes the
//! winner as a cell.
//!
//! # How a Search Works
//!
//! 1. **Population** - [`Population::random`] draws `population_size` random
//!    genomes of `genome_len` bits
//! 2. **Evaluation** - Every genome is scored by the fitness function
//! 3. **Selection** - Parents are drawn by roulette wheel
//! 4. **Reproduction** - Segment crossover and bit-flip mutation breed the next
//!    generation
//! 5. **Result** - After `generations` rounds, [`Population::evolve`] returns the
//!    best [`Scored`] chromosome
//!
//! See the [`genetic`] module for the generation loop and [`chromosome`] for the
//! encoding and operators.
//!
//! # Current Limitations
//!
//! - **Fixed generation count**: there is no convergence test, every search
//!   runs the full `generations`
//! - **Integer fitness only**: scores are `u32`, so roulette weights cannot be
//!   fractional

pub use self::{chromosome::Chromosome, genetic::*};

pub mod chromosome;
pub mod genetic;
