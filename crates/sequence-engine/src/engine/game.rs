use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{Board, Card, CellLabel, Deck, GameSeed, Hand, MoveCheck, MoveReason, Position, Team};

use super::{CompletedSequence, GameStats, detect_sequences};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameConfigError {
    #[display("seat count must be even and between 2 and 12, got {seats}")]
    InvalidSeatCount { seats: usize },
}

/// Number of cards dealt to each seat for a table of `seats` players.
pub const fn hand_size_for(seats: usize) -> Result<usize, GameConfigError> {
    match seats {
        2 => Ok(7),
        4 => Ok(6),
        6 => Ok(5),
        8 => Ok(4),
        10 | 12 => Ok(3),
        _ => Err(GameConfigError::InvalidSeatCount { seats }),
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameOutcome {
    Won { team: Team },
    /// A full draw cycle found no playable card. No winner is attributed.
    DeckExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TurnError {
    #[display("game is already finished ({outcome:?})")]
    Finished { outcome: GameOutcome },
    #[display("cannot play at {position}: {reason}")]
    IllegalMove {
        position: Position,
        reason: MoveReason,
    },
}

/// What the acting seat did with its card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TurnAction {
    /// Placed a token by spending a card showing the cell's face.
    Placed { card: Card },
    /// Placed a token by spending a two-eyed Jack.
    PlacedWithJoker { card: Card },
    /// Cleared an opposing token by spending a one-eyed Jack.
    Removed { card: Card },
}

impl TurnAction {
    #[must_use]
    pub const fn card(self) -> Card {
        match self {
            Self::Placed { card } | Self::PlacedWithJoker { card } | Self::Removed { card } => card,
        }
    }
}

/// Result of the draw step at the end of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawResult {
    /// `card` joined the hand after `cycled` unplayable cards went to the tail.
    Drew { card: Card, cycled: usize },
    /// No playable card came up before the cycle repeated; the game is over.
    Exhausted { cycled: usize },
}

/// Everything that happened during one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    pub seat: usize,
    pub team: Team,
    pub position: Position,
    pub action: TurnAction,
    pub sequences: Vec<CompletedSequence>,
    pub draw: DrawResult,
    pub next_player: usize,
    pub outcome: Option<GameOutcome>,
}

/// Complete state of one game: board, draw pile, hands and turn order.
///
/// Seat `i` plays for [`Team::from_seat`]`(i)`. A turn is played with
/// [`Game::play_turn`], which validates the target cell, applies the move,
/// scores new sequences, draws a replacement card and passes the turn on.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    deck: Deck,
    hands: Vec<Hand>,
    current_player: usize,
    stats: GameStats,
    outcome: Option<GameOutcome>,
}

impl Game {
    /// Starts a game with a thread-local random shuffle.
    pub fn new(seats: usize) -> Result<Self, GameConfigError> {
        Self::with_rng(seats, &mut rand::rng())
    }

    /// Starts a reproducible game: the same seed yields the same deck, hands
    /// and board.
    pub fn with_seed(seats: usize, seed: GameSeed) -> Result<Self, GameConfigError> {
        let mut rng = Pcg32::from_seed(seed.to_bytes());
        Self::with_rng(seats, &mut rng)
    }

    /// Shuffles the deck, deals round-robin from its front, then lays out the
    /// board, all from `rng`.
    pub fn with_rng<R>(seats: usize, rng: &mut R) -> Result<Self, GameConfigError>
    where
        R: Rng + ?Sized,
    {
        let hand_size = hand_size_for(seats)?;
        let mut deck = Deck::shuffled(rng);
        let mut hands = vec![Hand::default(); seats];
        for _ in 0..hand_size {
            for hand in &mut hands {
                let card = deck.draw().expect("a full deck covers every deal");
                hand.add(card);
            }
        }
        let board = Board::shuffled(rng);
        Self::from_parts(board, deck, hands)
    }

    /// Assembles a game from explicit parts, seat 0 to move.
    pub fn from_parts(board: Board, deck: Deck, hands: Vec<Hand>) -> Result<Self, GameConfigError> {
        hand_size_for(hands.len())?;
        Ok(Self {
            board,
            deck,
            hands,
            current_player: 0,
            stats: GameStats::new(),
            outcome: None,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    #[must_use]
    pub fn hand(&self, seat: usize) -> &Hand {
        &self.hands[seat]
    }

    #[must_use]
    pub fn seats(&self) -> usize {
        self.hands.len()
    }

    #[must_use]
    pub const fn current_player(&self) -> usize {
        self.current_player
    }

    #[must_use]
    pub const fn current_team(&self) -> Team {
        Team::from_seat(self.current_player)
    }

    #[must_use]
    pub fn current_hand(&self) -> &Hand {
        &self.hands[self.current_player]
    }

    #[must_use]
    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Classifies a move at `pos` for the seat to play.
    #[must_use]
    pub fn classify(&self, pos: Position) -> MoveCheck {
        self.board
            .classify(pos, self.current_team(), self.current_hand())
    }

    /// Every cell where the seat to play has a legal move.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Position> {
        self.board
            .legal_positions(self.current_team(), self.current_hand())
            .collect()
    }

    /// Plays one full turn for the current seat at `pos`.
    ///
    /// An illegal target leaves the game untouched and the same seat to play.
    pub fn play_turn(&mut self, pos: Position) -> Result<TurnReport, TurnError> {
        if let Some(outcome) = self.outcome {
            return Err(TurnError::Finished { outcome });
        }
        let seat = self.current_player;
        let team = self.current_team();
        let check = self.classify(pos);
        if !check.legal {
            return Err(TurnError::IllegalMove {
                position: pos,
                reason: check.reason,
            });
        }

        let hand = &mut self.hands[seat];
        let action = match (check.reason, self.board.cell(pos).label()) {
            (MoveReason::Taken, _) => TurnAction::Removed {
                card: hand.play_first_remover(),
            },
            (MoveReason::Card, CellLabel::Card(label)) => TurnAction::Placed {
                card: hand.play_exact(label),
            },
            (MoveReason::Joker, _) => TurnAction::PlacedWithJoker {
                card: hand.play_first_joker(),
            },
            (reason, label) => unreachable!("legal move with reason {reason:?} on {label}"),
        };
        debug!(seat, %team, position = %pos, card = %action.card(), "move applied");

        let sequences = if action.is_removed() {
            self.board.remove_token(pos);
            self.stats.record_removal();
            vec![]
        } else {
            self.board.place_token(pos, team);
            self.stats.record_placement();
            detect_sequences(&mut self.board, &mut self.stats, pos, team)
        };
        if let Some(team) = self.stats.winner() {
            self.finish(GameOutcome::Won { team });
        }

        let draw = self.draw_replacement(seat);
        self.stats.complete_turn();
        self.current_player = (self.current_player + 1) % self.seats();

        Ok(TurnReport {
            seat,
            team,
            position: pos,
            action,
            sequences,
            draw,
            next_player: self.current_player,
            outcome: self.outcome,
        })
    }

    /// Draws until a playable card turns up and gives it to `seat`.
    ///
    /// Unplayable cards are cycled to the tail. Drawing the first card of this
    /// step a second time (same exact label) ends the game, as does an empty
    /// pile.
    fn draw_replacement(&mut self, seat: usize) -> DrawResult {
        let Some(first) = self.deck.draw() else {
            self.finish(GameOutcome::DeckExhausted);
            return DrawResult::Exhausted { cycled: 0 };
        };
        let mut draw = first;
        let mut cycled = 0;
        while !self.board.card_is_playable(draw) {
            debug!(card = %draw, "card is not playable, cycling to tail");
            self.deck.cycle_to_tail(draw);
            cycled += 1;
            // the pile holds at least `draw` again
            let Some(next) = self.deck.draw() else {
                unreachable!("deck emptied while cycling");
            };
            draw = next;
            if draw == first {
                self.deck.cycle_to_tail(draw);
                self.stats.record_cycled(cycled);
                self.finish(GameOutcome::DeckExhausted);
                return DrawResult::Exhausted { cycled };
            }
        }
        self.stats.record_cycled(cycled);
        self.hands[seat].add(draw);
        DrawResult::Drew { card: draw, cycled }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        // a win found earlier in the turn takes precedence over exhaustion
        if self.outcome.is_none() {
            info!(?outcome, turns = self.stats.turns() + 1, scores = ?self.stats.scores(), "game finished");
            self.outcome = Some(outcome);
        }
    }
}
