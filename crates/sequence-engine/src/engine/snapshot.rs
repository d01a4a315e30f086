use serde::Serialize;

use crate::core::{CellLabel, Position, Team};

use super::{Game, GameOutcome};

/// A read-only picture of a game for presentation layers.
///
/// Holds what a display needs and nothing it could use to mutate the game:
/// the cells, the hand of the seat to play, the scores and the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub cells: Vec<CellSnapshot>,
    pub current_player: usize,
    pub current_team: Team,
    pub hand: Vec<String>,
    pub scores: [usize; 2],
    pub turns: usize,
    pub deck_remaining: usize,
    pub outcome: Option<GameOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellSnapshot {
    #[serde(flatten)]
    pub position: Position,
    pub label: CellLabel,
    pub occupant: Option<Team>,
    pub locked: bool,
}

impl GameSnapshot {
    #[must_use]
    pub fn new(game: &Game) -> Self {
        let cells = game
            .board()
            .cells()
            .map(|(position, cell)| CellSnapshot {
                position,
                label: cell.label(),
                occupant: cell.occupant(),
                locked: cell.is_locked(),
            })
            .collect();
        Self {
            cells,
            current_player: game.current_player(),
            current_team: game.current_team(),
            hand: game
                .current_hand()
                .cards()
                .iter()
                .map(ToString::to_string)
                .collect(),
            scores: game.stats().scores(),
            turns: game.stats().turns(),
            deck_remaining: game.deck().len(),
            outcome: game.outcome(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSeed;

    #[test]
    fn test_snapshot_of_fresh_game() {
        let game = Game::with_seed(2, GameSeed::from_bytes([1; 16])).unwrap();
        let snapshot = GameSnapshot::new(&game);
        assert_eq!(snapshot.cells.len(), 100);
        assert_eq!(
            snapshot
                .cells
                .iter()
                .filter(|c| c.label == CellLabel::Corner)
                .count(),
            4
        );
        assert!(snapshot.cells.iter().all(|c| c.occupant.is_none() && !c.locked));
        assert_eq!(snapshot.hand.len(), 7);
        assert_eq!(snapshot.current_team, Team::First);
        assert_eq!(snapshot.scores, [0, 0]);
        assert_eq!(snapshot.deck_remaining, 104 - 14);
        assert_eq!(snapshot.outcome, None);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let game = Game::with_seed(2, GameSeed::from_bytes([1; 16])).unwrap();
        let json = serde_json::to_value(GameSnapshot::new(&game)).unwrap();
        let corner = &json["cells"][0];
        assert_eq!(corner["x"], 0);
        assert_eq!(corner["y"], 0);
        assert_eq!(corner["label"], "*");
        assert_eq!(corner["occupant"], serde_json::Value::Null);
        assert_eq!(json["hand"].as_array().unwrap().len(), 7);
        assert_eq!(json["outcome"], serde_json::Value::Null);
    }
}
