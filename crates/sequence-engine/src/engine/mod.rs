//! Turn rules and game state built on the [`core`](crate::core) types.
//!
//! - [`Game`] - Owned game state: board, deck, hands, turn order, outcome
//! - [`detect_sequences`] - Scoring and locking of 5-cell runs
//! - [`GameStats`] - Scores and per-game counters
//! - [`GameSnapshot`] - Read-only view for presentation layers
//!
//! # Turn Flow
//!
//! [`Game::play_turn`] runs one turn for the seat to play:
//!
//! 1. Classify the target cell; an illegal target is returned as
//!    [`TurnError::IllegalMove`] and nothing changes
//! 2. Spend the card and place (or, with a remover, clear) a token
//! 3. Score and lock any sequences through the placed token
//! 4. Draw a playable replacement card, cycling unplayable ones to the tail
//! 5. Pass the turn to the next seat
//!
//! The game ends when a team reaches [`WIN_THRESHOLD`] sequences or when the
//! draw step cycles through the pile without finding a playable card.
//!
//! # Example
//!
//! ```
//! use sequence_engine::{Game, GameSeed, TurnError};
//!
//! let mut game = Game::with_seed(2, GameSeed::from_bytes([3; 16])).unwrap();
//!
//! let target = game.legal_moves()[0];
//! let report = game.play_turn(target).unwrap();
//! assert_eq!(report.seat, 0);
//! assert_eq!(game.current_player(), 1);
//!
//! // the same cell is now taken by the other team
//! if let Err(TurnError::IllegalMove { reason, .. }) = game.play_turn(target) {
//!     println!("rejected: {reason}");
//! }
//! ```

pub use self::{game::*, game_stats::*, sequence::*, snapshot::*};

mod game;
mod game_stats;
mod sequence;
mod snapshot;
