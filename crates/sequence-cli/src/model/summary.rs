use chrono::{DateTime, Utc};
use sequence_engine::{GameOutcome, GameSeed, Team};
use sequence_evaluator::{
    move_selector::SelectorConfig,
    session::{SessionOutcome, SessionResult},
};
use serde::Serialize;

use super::seat::SeatKind;

/// JSON report written by `simulate`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub generated_at: DateTime<Utc>,
    pub seats: usize,
    pub players: Vec<SeatKind>,
    pub config: SelectorConfig,
    pub turn_limit: usize,
    pub games: Vec<GameSummary>,
    pub totals: Totals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub seed: GameSeed,
    pub outcome: SessionOutcome,
    pub scores: [usize; 2],
    pub turns: usize,
    pub placements: usize,
    pub removals: usize,
    pub cycled_cards: usize,
}

impl GameSummary {
    #[must_use]
    pub fn new(seed: GameSeed, result: &SessionResult) -> Self {
        let stats = &result.stats;
        Self {
            seed,
            outcome: result.outcome,
            scores: stats.scores(),
            turns: stats.turns(),
            placements: stats.placements(),
            removals: stats.removals(),
            cycled_cards: stats.cycled_cards(),
        }
    }
}

/// How the simulated games ended, counted by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Wins per team, team 1 first.
    pub wins: [usize; 2],
    pub deck_exhausted: usize,
    pub stalled: usize,
    pub turn_limit: usize,
}

impl Totals {
    pub fn record(&mut self, outcome: SessionOutcome) {
        match outcome {
            SessionOutcome::Finished {
                outcome: GameOutcome::Won { team },
            } => self.wins[team.index()] += 1,
            SessionOutcome::Finished {
                outcome: GameOutcome::DeckExhausted,
            } => self.deck_exhausted += 1,
            SessionOutcome::Stalled { .. } => self.stalled += 1,
            SessionOutcome::TurnLimit { .. } => self.turn_limit += 1,
        }
    }

    #[must_use]
    pub fn wins(&self, team: Team) -> usize {
        self.wins[team.index()]
    }

    #[must_use]
    pub fn games(&self) -> usize {
        self.wins.iter().sum::<usize>() + self.deck_exhausted + self.stalled + self.turn_limit
    }
}

impl SimulationSummary {
    #[must_use]
    pub fn new(
        players: Vec<SeatKind>,
        config: SelectorConfig,
        turn_limit: usize,
        games: Vec<GameSummary>,
    ) -> Self {
        let mut totals = Totals::default();
        for game in &games {
            totals.record(game.outcome);
        }
        Self {
            generated_at: Utc::now(),
            seats: players.len(),
            players,
            config,
            turn_limit,
            games,
            totals,
        }
    }
}
