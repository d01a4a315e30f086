//! Sequence detection around a freshly placed token.
//!
//! After a token is placed at `(px, py)`, each of the four [`Axis`] directions
//! is scanned over the clipped span of up to 4 cells either side. Every
//! 5-cell window inside the span is tested in ascending order along the axis.
//!
//! A window qualifies when every cell is a corner or holds the acting team's
//! token, and at most one of its non-corner cells is already locked. That
//! single locked cell is how a new sequence may share one token with an older
//! one.
//!
//! A qualifying window scores one point and locks its five cells at once, so
//! later windows in the same scan already see those locks.

use serde::Serialize;
use tracing::info;

use crate::core::{Axis, Board, Position, SEQUENCE_LEN, Team};

use super::GameStats;

/// A 5-cell run counted for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletedSequence {
    pub axis: Axis,
    pub team: Team,
    pub cells: [Position; SEQUENCE_LEN],
}

/// Scans around `pos`, locks every qualifying window and credits `team`.
///
/// Returns the sequences completed by this placement, possibly several on
/// several axes.
pub fn detect_sequences(
    board: &mut Board,
    stats: &mut GameStats,
    pos: Position,
    team: Team,
) -> Vec<CompletedSequence> {
    let mut completed = vec![];
    for axis in Axis::ALL {
        let span = axis.span(pos);
        for window in span.windows(SEQUENCE_LEN) {
            if !window_qualifies(board, window, team) {
                continue;
            }
            for &cell in window {
                board.lock(cell);
            }
            stats.add_sequences(team, 1);
            let cells: [Position; SEQUENCE_LEN] = window
                .try_into()
                .expect("windows() yields SEQUENCE_LEN cells");
            info!(%team, ?axis, from = %cells[0], to = %cells[SEQUENCE_LEN - 1], "sequence completed");
            completed.push(CompletedSequence { axis, team, cells });
        }
    }
    completed
}

fn window_qualifies(board: &Board, window: &[Position], team: Team) -> bool {
    let mut reused = false;
    for &pos in window {
        let cell = board.cell(pos);
        if cell.is_corner() {
            continue;
        }
        if cell.occupant() != Some(team) {
            return false;
        }
        if cell.is_locked() {
            if reused {
                return false;
            }
            reused = true;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Card;

    fn board() -> Board {
        Board::with_cards(Card::board_cards())
    }

    fn place(board: &mut Board, cells: &[(usize, usize)], team: Team) {
        for &(x, y) in cells {
            board.place_token(Position::new(x, y), team);
        }
    }

    fn detect(board: &mut Board, stats: &mut GameStats, x: usize, y: usize) -> usize {
        let team = board.cell(Position::new(x, y)).occupant().unwrap();
        detect_sequences(board, stats, Position::new(x, y), team).len()
    }

    #[test]
    fn test_five_in_a_row_scores_once_and_locks() {
        let mut board = board();
        let mut stats = GameStats::new();
        let row = [(2, 4), (3, 4), (4, 4), (5, 4), (6, 4)];
        place(&mut board, &row, Team::First);

        assert_eq!(detect(&mut board, &mut stats, 4, 4), 1);
        assert_eq!(stats.score(Team::First), 1);
        assert_eq!(stats.score(Team::Second), 0);
        for (x, y) in row {
            assert!(board.cell(Position::new(x, y)).is_locked());
        }
        assert!(!board.cell(Position::new(1, 4)).is_locked());
        assert!(!board.cell(Position::new(7, 4)).is_locked());
    }

    #[test]
    fn test_four_tokens_do_not_score() {
        let mut board = board();
        let mut stats = GameStats::new();
        place(&mut board, &[(3, 1), (3, 2), (3, 3), (3, 4)], Team::Second);
        place(&mut board, &[(3, 5)], Team::First);
        assert_eq!(detect(&mut board, &mut stats, 3, 4), 0);
        assert_eq!(stats.scores(), [0, 0]);
    }

    #[test]
    fn test_sixth_token_does_not_reuse_two_locked_cells() {
        let mut board = board();
        let mut stats = GameStats::new();
        place(&mut board, &[(1, 2), (2, 2), (3, 2), (4, 2), (5, 2)], Team::First);
        assert_eq!(detect(&mut board, &mut stats, 5, 2), 1);

        place(&mut board, &[(6, 2)], Team::First);
        assert_eq!(detect(&mut board, &mut stats, 6, 2), 0);
        assert_eq!(stats.score(Team::First), 1);
        assert!(!board.cell(Position::new(6, 2)).is_locked());
    }

    #[test]
    fn test_new_sequence_may_share_one_locked_cell() {
        let mut board = board();
        let mut stats = GameStats::new();
        place(&mut board, &[(1, 2), (2, 2), (3, 2), (4, 2), (5, 2)], Team::First);
        assert_eq!(detect(&mut board, &mut stats, 5, 2), 1);

        // (5, 2) is reused, (6..=9, 2) are new
        place(&mut board, &[(6, 2), (7, 2), (8, 2), (9, 2)], Team::First);
        assert_eq!(detect(&mut board, &mut stats, 9, 2), 1);
        assert_eq!(stats.score(Team::First), 2);
        assert_eq!(stats.winner(), Some(Team::First));
    }

    #[test]
    fn test_two_axes_at_once_score_two() {
        let mut board = board();
        let mut stats = GameStats::new();
        place(&mut board, &[(1, 5), (2, 5), (4, 5), (5, 5)], Team::Second);
        place(&mut board, &[(3, 1), (3, 2), (3, 3), (3, 4)], Team::Second);
        place(&mut board, &[(3, 5)], Team::Second);

        let completed = detect_sequences(&mut board, &mut stats, Position::new(3, 5), Team::Second);
        assert_eq!(completed.len(), 2);
        assert_eq!(completed[0].axis, Axis::Vertical);
        assert_eq!(completed[1].axis, Axis::Horizontal);
        assert_eq!(stats.score(Team::Second), 2);
    }

    #[test]
    fn test_corner_counts_for_any_team() {
        let mut board = board();
        let mut stats = GameStats::new();
        place(&mut board, &[(0, 1), (0, 2), (0, 3), (0, 4)], Team::First);
        assert_eq!(detect(&mut board, &mut stats, 0, 4), 1);
        assert!(board.cell(Position::new(0, 0)).is_locked());

        // a locked corner does not use up the one reusable cell
        place(&mut board, &[(1, 0), (2, 0), (3, 0), (4, 0)], Team::First);
        assert_eq!(detect(&mut board, &mut stats, 4, 0), 1);
    }

    #[test]
    fn test_both_diagonals() {
        let mut board = board();
        let mut stats = GameStats::new();
        let diagonal = [(2, 2), (3, 3), (4, 4), (5, 5), (6, 6)];
        place(&mut board, &diagonal, Team::First);
        assert_eq!(detect(&mut board, &mut stats, 6, 6), 1);

        let anti = [(2, 8), (3, 7), (4, 6), (5, 5), (6, 4)];
        place(&mut board, &anti, Team::First);
        let completed = detect_sequences(&mut board, &mut stats, Position::new(2, 8), Team::First);
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].axis, Axis::AntiDiagonal);
        assert_eq!(
            completed[0].cells,
            [(2, 8), (3, 7), (4, 6), (5, 5), (6, 4)].map(|(x, y)| Position::new(x, y))
        );
    }

    #[test]
    fn test_long_run_locks_progressively() {
        let mut board = board();
        let mut stats = GameStats::new();
        // nine in a column, last token placed in the middle
        let column = (1..=9).map(|y| (4, y)).collect::<Vec<_>>();
        place(&mut board, &column, Team::Second);
        // window y=1..=5 scores and locks; y=2..=6 and later reuse 4+ locked cells
        // until y=5..=9 which shares only y=5
        assert_eq!(detect(&mut board, &mut stats, 4, 5), 2);
        assert!(column.iter().all(|&(x, y)| board.cell(Position::new(x, y)).is_locked()));
    }
}
