//! Whole games between computer seats.
//!
//! [`SessionRunner`] drives a [`Game`] turn by turn, asking each seat's
//! [`AiMoveSelector`] for a cell, until the game finishes. Two more endings
//! exist for sessions that cannot finish on their own:
//!
//! - **Stalled**: the seat to play has no legal cell (all its cards are dead and
//!   it holds no Jack), or its search gave up
//! - **Turn limit**: the configured number of turns ran out, which can only
//!   happen when tokens keep getting removed and replaced
//!
//! # Usage
//!
//! ```
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg32;
//! use sequence_engine::{Game, GameSeed};
//! use sequence_evaluator::{
//!     move_selector::{AiMoveSelector, SelectorConfig},
//!     session::SessionRunner,
//! };
//! use sequence_genetic::GeneticParams;
//!
//! let mut rng = Pcg32::seed_from_u64(0);
//! let mut game = Game::with_rng(2, &mut rng).unwrap();
//! let config = SelectorConfig {
//!     genetic: GeneticParams { generations: 10, ..GeneticParams::default() },
//!     ..SelectorConfig::default()
//! };
//! let mut seats = (0..2)
//!     .map(|_| AiMoveSelector::from_rng(config, &mut rng).unwrap())
//!     .collect::<Vec<_>>();
//!
//! let result = SessionRunner::new(10).play(&mut game, &mut seats);
//! assert!(result.stats.turns() <= 10);
//! ```

use serde::Serialize;
use sequence_engine::{Game, GameOutcome, GameStats};
use tracing::{info, warn};

use crate::move_selector::{AiMoveSelector, NoLegalMoveError};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The game itself finished.
    Finished { outcome: GameOutcome },
    /// A seat could not produce a legal move.
    Stalled { seat: usize, reason: StallReason },
    TurnLimit { turns: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StallReason {
    NoLegalCell,
    AttemptsExhausted,
}

impl From<NoLegalMoveError> for StallReason {
    fn from(error: NoLegalMoveError) -> Self {
        match error {
            NoLegalMoveError::NoLegalCell { .. } => Self::NoLegalCell,
            NoLegalMoveError::AttemptsExhausted { .. } => Self::AttemptsExhausted,
        }
    }
}

/// Result of one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub outcome: SessionOutcome,
    pub stats: GameStats,
}

/// Plays AI-only sessions with a turn limit.
#[derive(Debug, Clone, Copy)]
pub struct SessionRunner {
    turn_limit: usize,
}

impl Default for SessionRunner {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TURN_LIMIT)
    }
}

impl SessionRunner {
    pub const DEFAULT_TURN_LIMIT: usize = 1000;

    #[must_use]
    pub const fn new(turn_limit: usize) -> Self {
        Self { turn_limit }
    }

    #[must_use]
    pub const fn turn_limit(&self) -> usize {
        self.turn_limit
    }

    /// Plays `game` to the end with one selector per seat.
    ///
    /// # Panics
    ///
    /// Panics if `seats.len()` differs from the game's seat count.
    pub fn play(&self, game: &mut Game, seats: &mut [AiMoveSelector]) -> SessionResult {
        assert_eq!(seats.len(), game.seats(), "one selector per seat");
        let outcome = loop {
            if let Some(outcome) = game.outcome() {
                break SessionOutcome::Finished { outcome };
            }
            let turns = game.stats().turns();
            if turns >= self.turn_limit {
                break SessionOutcome::TurnLimit { turns };
            }
            let seat = game.current_player();
            let choice = match seats[seat].select_move(game) {
                Ok(choice) => choice,
                Err(error) => {
                    warn!(%error, "session stalled");
                    break SessionOutcome::Stalled {
                        seat,
                        reason: error.into(),
                    };
                }
            };
            game.play_turn(choice.position)
                .expect("selected moves are classified legal");
        };
        info!(?outcome, turns = game.stats().turns(), scores = ?game.stats().scores(), "session ended");
        SessionResult {
            outcome,
            stats: game.stats().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;
    use sequence_engine::{Board, Card, Deck, Hand, Team};
    use sequence_genetic::GeneticParams;

    use super::*;
    use crate::{fitness::FitnessKind, move_selector::SelectorConfig};

    fn seats(count: usize, fitness: FitnessKind, rng: &mut Pcg32) -> Vec<AiMoveSelector> {
        let config = SelectorConfig {
            fitness,
            genetic: GeneticParams {
                generations: 15,
                ..GeneticParams::default()
            },
            ..SelectorConfig::default()
        };
        (0..count)
            .map(|_| AiMoveSelector::from_rng(config, rng).unwrap())
            .collect()
    }

    #[test]
    fn test_session_plays_until_an_ending() {
        let mut rng = Pcg32::seed_from_u64(31);
        let mut game = Game::with_rng(2, &mut rng).unwrap();
        let mut seats = seats(2, FitnessKind::Heuristic, &mut rng);
        let result = SessionRunner::new(400).play(&mut game, &mut seats);

        match result.outcome {
            SessionOutcome::Finished {
                outcome: GameOutcome::Won { team },
            } => assert!(result.stats.score(team) >= 2),
            SessionOutcome::Finished { .. } | SessionOutcome::Stalled { .. } => {}
            SessionOutcome::TurnLimit { turns } => assert_eq!(turns, 400),
        }
        assert_eq!(&result.stats, game.stats());
        assert!(result.stats.turns() <= 400);
    }

    #[test]
    fn test_turn_limit_stops_session() {
        let mut rng = Pcg32::seed_from_u64(32);
        let mut game = Game::with_rng(4, &mut rng).unwrap();
        let mut seats = seats(4, FitnessKind::Random, &mut rng);
        let result = SessionRunner::new(3).play(&mut game, &mut seats);
        assert_eq!(result.outcome, SessionOutcome::TurnLimit { turns: 3 });
        assert_eq!(result.stats.turns(), 3);
        assert_eq!(game.current_player(), 3);
    }

    #[test]
    fn test_dead_hand_stalls() {
        let board = Board::with_cards(Card::board_cards());
        let mut blocked = board.clone();
        let dead = "Ks1".parse::<Card>().unwrap();
        for pos in board.face_positions(dead) {
            blocked.place_token(pos, Team::Second);
        }
        let hands = vec![Hand::new(vec![dead]), Hand::default()];
        let mut game = Game::from_parts(blocked, Deck::ordered(), hands).unwrap();

        let mut rng = Pcg32::seed_from_u64(33);
        let mut seats = seats(2, FitnessKind::Heuristic, &mut rng);
        let result = SessionRunner::default().play(&mut game, &mut seats);
        assert_eq!(
            result.outcome,
            SessionOutcome::Stalled {
                seat: 0,
                reason: StallReason::NoLegalCell
            }
        );
        assert_eq!(result.stats.turns(), 0);
    }

    #[test]
    #[should_panic(expected = "one selector per seat")]
    fn test_seat_count_mismatch_panics() {
        let mut rng = Pcg32::seed_from_u64(34);
        let mut game = Game::with_rng(2, &mut rng).unwrap();
        let mut seats = seats(1, FitnessKind::Random, &mut rng);
        SessionRunner::default().play(&mut game, &mut seats);
    }
}
