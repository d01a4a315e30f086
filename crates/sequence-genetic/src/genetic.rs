//! Generational genetic algorithm over bit-string chromosomes.
//!
//! # Algorithm Overview
//!
//! One generation runs as follows:
//!
//! 1. **Evaluate Fitness** - Score every chromosome with the bound [`Fitness`]
//! 2. **Roulette Selection** - Pick two parents with probability proportional to
//!    fitness (uniformly when every score is zero)
//! 3. **Segment Crossover** - With probability `crossover_rate` swap a random
//!    contiguous run of bits between the parents, otherwise copy them
//! 4. **Mutation** - Flip every bit of both children with probability
//!    `mutation_rate`
//! 5. **Replacement** - The children replace the whole population
//!
//! There is no elitism: instead the population remembers the best scored
//! chromosome it has ever evaluated, and [`Population::evolve`] scores the
//! final generation too, so [`Population::best`] is never worse than anything
//! seen.
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use sequence_genetic::{Chromosome, GeneticParams, Population};
//!
//! let mut rng = Pcg32::seed_from_u64(0);
//! let params = GeneticParams {
//!     generations: 50,
//!     ..GeneticParams::default()
//! };
//! // prefer large first fields
//! let fitness = |c: &Chromosome| c.decode_pair().0;
//! let mut population = Population::random(params, fitness, &mut rng).unwrap();
//! let best = population.evolve(&mut rng);
//! assert!(best.fitness >= 10);
//! ```

use rand::{
    Rng,
    distr::{Distribution as _, weighted::WeightedIndex},
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::chromosome::{self, Chromosome};

/// Scores a chromosome; higher is better.
///
/// Any `FnMut(&Chromosome) -> u32` closure is a fitness function.
pub trait Fitness {
    fn evaluate(&mut self, chromosome: &Chromosome) -> u32;
}

impl<F> Fitness for F
where
    F: FnMut(&Chromosome) -> u32,
{
    fn evaluate(&mut self, chromosome: &Chromosome) -> u32 {
        self(chromosome)
    }
}

/// Evolution parameters.
///
/// The defaults are tuned for picking a board cell: an 8-bit genome (two 4-bit
/// coordinates), 15 chromosomes, crossover 0.7, mutation 0.001 and 800
/// generations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticParams {
    /// Bits per chromosome
    pub genome_len: usize,
    /// Chromosomes per generation
    pub population_size: usize,
    /// Probability that a pair of parents exchanges a segment
    pub crossover_rate: f64,
    /// Per-bit flip probability
    pub mutation_rate: f64,
    /// Generations bred by [`Population::evolve`]
    pub generations: usize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            genome_len: 8,
            population_size: 15,
            crossover_rate: 0.7,
            mutation_rate: 0.001,
            generations: 800,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum GeneticParamsError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("genome length must be between 2 and {}, got {len}", GeneticParams::MAX_GENOME_LEN)]
    GenomeLength { len: usize },
    #[display("{name} must be within [0, 1], got {value}")]
    Rate { name: &'static str, value: f64 },
}

impl GeneticParams {
    /// Longest genome whose halves still decode into `u32` fields.
    pub const MAX_GENOME_LEN: usize = 64;

    pub fn validate(&self) -> Result<(), GeneticParamsError> {
        if self.population_size == 0 {
            return Err(GeneticParamsError::EmptyPopulation);
        }
        if !(2..=Self::MAX_GENOME_LEN).contains(&self.genome_len) {
            return Err(GeneticParamsError::GenomeLength {
                len: self.genome_len,
            });
        }
        for (name, value) in [
            ("crossover rate", self.crossover_rate),
            ("mutation rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GeneticParamsError::Rate { name, value });
            }
        }
        Ok(())
    }
}

/// A chromosome together with the fitness it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scored {
    pub chromosome: Chromosome,
    pub fitness: u32,
}

/// A generation of chromosomes bound to its parameters and fitness function.
#[derive(Debug, Clone)]
pub struct Population<F> {
    params: GeneticParams,
    fitness: F,
    chromosomes: Vec<Chromosome>,
    generation: usize,
    best: Option<Scored>,
}

impl<F> Population<F>
where
    F: Fitness,
{
    /// Creates a population of random chromosomes.
    pub fn random<R>(params: GeneticParams, fitness: F, rng: &mut R) -> Result<Self, GeneticParamsError>
    where
        R: Rng + ?Sized,
    {
        params.validate()?;
        let chromosomes = (0..params.population_size)
            .map(|_| Chromosome::random(rng, params.genome_len))
            .collect();
        Ok(Self {
            params,
            fitness,
            chromosomes,
            generation: 0,
            best: None,
        })
    }

    #[must_use]
    pub fn params(&self) -> &GeneticParams {
        &self.params
    }

    #[must_use]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    /// Number of generations bred so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best chromosome evaluated so far, `None` before the first evaluation.
    #[must_use]
    pub fn best(&self) -> Option<&Scored> {
        self.best.as_ref()
    }

    /// Scores the current generation and updates the best-seen record.
    pub fn evaluate(&mut self) -> Vec<u32> {
        let scores = self
            .chromosomes
            .iter()
            .map(|c| self.fitness.evaluate(c))
            .collect::<Vec<_>>();
        for (chromosome, &fitness) in self.chromosomes.iter().zip(&scores) {
            if self.best.as_ref().is_none_or(|best| fitness > best.fitness) {
                self.best = Some(Scored {
                    chromosome: chromosome.clone(),
                    fitness,
                });
            }
        }
        scores
    }

    /// Evaluates the current generation and replaces it with its offspring.
    pub fn step<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let scores = self.evaluate();
        trace!(
            generation = self.generation,
            max = scores.iter().max().copied().unwrap_or_default(),
            total = scores.iter().map(|&s| u64::from(s)).sum::<u64>(),
            "generation evaluated"
        );

        let roulette = WeightedIndex::new(&scores).ok();
        let pick = |rng: &mut R| match &roulette {
            Some(roulette) => roulette.sample(rng),
            None => rng.random_range(0..scores.len()),
        };

        let mut next = Vec::with_capacity(self.chromosomes.len());
        while next.len() < self.chromosomes.len() {
            let p1 = &self.chromosomes[pick(rng)];
            let p2 = &self.chromosomes[pick(rng)];
            let (mut c1, mut c2) = if rng.random_bool(self.params.crossover_rate) {
                chromosome::segment_crossover(p1, p2, rng)
            } else {
                (p1.clone(), p2.clone())
            };
            chromosome::mutate(&mut c1, self.params.mutation_rate, rng);
            chromosome::mutate(&mut c2, self.params.mutation_rate, rng);
            next.push(c1);
            if next.len() < self.chromosomes.len() {
                next.push(c2);
            }
        }
        self.chromosomes = next;
        self.generation += 1;
    }

    /// Breeds `params.generations` generations, scores the last one and returns
    /// the best chromosome seen.
    pub fn evolve<R>(&mut self, rng: &mut R) -> Scored
    where
        R: Rng + ?Sized,
    {
        for _ in 0..self.params.generations {
            self.step(rng);
        }
        self.evaluate();
        self.best
            .clone()
            .expect("a validated population always evaluates at least one chromosome")
    }
}
