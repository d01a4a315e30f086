//! Fitness functions that score a candidate cell for the seat to play.
//!
//! A candidate arrives as the raw `(x, y)` decoded from a chromosome, before
//! clamping, so values beyond the board are possible and score 0.
//!
//! - [`HeuristicFitness`] rewards cells near the team's own tokens and, more
//!   strongly, near the opponent's
//! - [`RandomFitness`] ignores the board and returns noise
//!
//! # Heuristic
//!
//! For a legal cell, each of the four axes through it is scanned over the
//! clipped window of up to 4 cells either side (the cell itself included).
//! With `near` the acting team's tokens and `other` the opponent's on that
//! axis:
//!
//! ```text
//! fitness = 1 + Σ near² + Σ other³
//! ```
//!
//! [`DiagonalScan::Square`] replaces both diagonal lines by the whole clipped
//! 9×9 square around the cell, counted twice. Older tuning was done with that
//! neighbourhood, so it is kept selectable.

use std::fmt;

use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use sequence_engine::{AXIS_REACH, Axis, Board, Game, MAX_INDEX, Position, Team};

/// Scores candidate cells for the seat to play in `game`.
pub trait MoveFitness: fmt::Debug {
    /// Scores the raw candidate `(x, y)`; higher is better, 0 for cells that
    /// cannot be played.
    fn evaluate_candidate(&mut self, game: &Game, x: u32, y: u32) -> u32;
}

/// Which fitness function an AI seat uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessKind {
    #[default]
    Heuristic,
    Random,
}

/// Neighbourhood used for the two diagonal terms of [`HeuristicFitness`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagonalScan {
    /// The diagonal and anti-diagonal lines through the cell.
    #[default]
    Line,
    /// The clipped square around the cell, for both diagonal terms.
    Square,
}

/// Token counts along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineCount {
    pub near: u32,
    pub other: u32,
}

impl LineCount {
    fn count<I>(board: &Board, team: Team, cells: I) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        let mut count = Self::default();
        for pos in cells {
            match board.cell(pos).occupant() {
                Some(occupant) if occupant == team => count.near += 1,
                Some(_) => count.other += 1,
                None => {}
            }
        }
        count
    }

    const fn score(self) -> u32 {
        self.near.pow(2) + self.other.pow(3)
    }
}

/// Counts tokens around `pos` for `team` on the four axes, in [`Axis::ALL`]
/// order.
#[must_use]
pub fn neighbourhood_counts(
    board: &Board,
    pos: Position,
    team: Team,
    scan: DiagonalScan,
) -> [LineCount; 4] {
    Axis::ALL.map(|axis| match (axis, scan) {
        (Axis::Diagonal | Axis::AntiDiagonal, DiagonalScan::Square) => {
            LineCount::count(board, team, clipped_square(pos))
        }
        _ => LineCount::count(board, team, axis.span(pos)),
    })
}

fn clipped_square(center: Position) -> impl Iterator<Item = Position> {
    let range = |v: usize| v.saturating_sub(AXIS_REACH)..=(v + AXIS_REACH).min(MAX_INDEX);
    range(center.x()).flat_map(move |x| range(center.y()).map(move |y| Position::new(x, y)))
}

/// Board-reading fitness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeuristicFitness {
    scan: DiagonalScan,
}

impl HeuristicFitness {
    #[must_use]
    pub const fn new(scan: DiagonalScan) -> Self {
        Self { scan }
    }
}

impl MoveFitness for HeuristicFitness {
    fn evaluate_candidate(&mut self, game: &Game, x: u32, y: u32) -> u32 {
        let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
            return 0;
        };
        let Ok(pos) = Position::try_new(x, y) else {
            return 0;
        };
        if !game.classify(pos).legal {
            return 0;
        }
        let counts = neighbourhood_counts(game.board(), pos, game.current_team(), self.scan);
        1 + counts.iter().map(|c| c.score()).sum::<u32>()
    }
}

/// Fitness that ignores the candidate: a uniform integer in `0..10`.
#[derive(Debug, Clone)]
pub struct RandomFitness {
    rng: Pcg32,
}

impl RandomFitness {
    #[must_use]
    pub const fn new(rng: Pcg32) -> Self {
        Self { rng }
    }
}

impl MoveFitness for RandomFitness {
    fn evaluate_candidate(&mut self, _game: &Game, _x: u32, _y: u32) -> u32 {
        self.rng.random_range(0..10)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use sequence_engine::{Card, Deck, Hand};

    use super::*;

    fn board() -> Board {
        Board::with_cards(Card::board_cards())
    }

    fn joker_game(board: Board) -> Game {
        let hands = vec![
            Hand::new(vec!["Jh1".parse().unwrap()]),
            Hand::new(vec!["Jd1".parse().unwrap()]),
        ];
        Game::from_parts(board, Deck::ordered(), hands).unwrap()
    }

    fn with_tokens(cells: &[(usize, usize, Team)]) -> Board {
        let mut board = board();
        for &(x, y, team) in cells {
            board.place_token(Position::new(x, y), team);
        }
        board
    }

    #[test]
    fn test_out_of_range_and_illegal_score_zero() {
        let game = joker_game(board());
        let mut fitness = HeuristicFitness::default();
        assert_eq!(fitness.evaluate_candidate(&game, 10, 3), 0);
        assert_eq!(fitness.evaluate_candidate(&game, 3, 15), 0);
        assert_eq!(fitness.evaluate_candidate(&game, u32::MAX, 0), 0);
        // corner
        assert_eq!(fitness.evaluate_candidate(&game, 0, 0), 0);
        // empty board, joker in hand
        assert_eq!(fitness.evaluate_candidate(&game, 4, 4), 1);
    }

    #[test]
    fn test_own_tokens_on_one_axis_score_square() {
        // three own tokens in the same column, nothing else nearby
        let board = with_tokens(&[(5, 1, Team::First), (5, 2, Team::First), (5, 7, Team::First)]);
        let game = joker_game(board);
        let mut fitness = HeuristicFitness::new(DiagonalScan::Line);
        assert_eq!(fitness.evaluate_candidate(&game, 5, 4), 1 + 3 * 3);
    }

    #[test]
    fn test_opponent_tokens_score_cube() {
        let board = with_tokens(&[(2, 6, Team::Second), (6, 6, Team::Second)]);
        let game = joker_game(board);
        let mut fitness = HeuristicFitness::new(DiagonalScan::Line);
        // both on the row through (4, 6)
        assert_eq!(fitness.evaluate_candidate(&game, 4, 6), 1 + 2 * 2 * 2);
    }

    #[test]
    fn test_square_scan_counts_box_twice() {
        // (2, 3) is off every line through (4, 4) but inside its square
        let board = with_tokens(&[(2, 3, Team::First)]);
        let game = joker_game(board.clone());

        let lines = neighbourhood_counts(&board, Position::new(4, 4), Team::First, DiagonalScan::Line);
        assert!(lines.iter().all(|c| *c == LineCount::default()));
        let mut fitness = HeuristicFitness::new(DiagonalScan::Line);
        assert_eq!(fitness.evaluate_candidate(&game, 4, 4), 1);

        let square =
            neighbourhood_counts(&board, Position::new(4, 4), Team::First, DiagonalScan::Square);
        assert_eq!(square[2], LineCount { near: 1, other: 0 });
        assert_eq!(square[3], square[2]);
        let mut fitness = HeuristicFitness::new(DiagonalScan::Square);
        assert_eq!(fitness.evaluate_candidate(&game, 4, 4), 1 + 1 + 1);
    }

    #[test]
    fn test_clipped_square_size() {
        assert_eq!(clipped_square(Position::new(5, 5)).count(), 81);
        assert_eq!(clipped_square(Position::new(0, 0)).count(), 25);
        assert_eq!(clipped_square(Position::new(9, 4)).count(), 5 * 9);
    }

    #[test]
    fn test_random_fitness_stays_below_ten() {
        let game = joker_game(board());
        let mut fitness = RandomFitness::new(Pcg32::seed_from_u64(9));
        let values = (0..500)
            .map(|i| fitness.evaluate_candidate(&game, i, i))
            .collect::<Vec<_>>();
        assert!(values.iter().all(|&v| v < 10));
        assert!(values.contains(&0));
        assert!(values.contains(&9));
    }
}
