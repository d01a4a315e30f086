use std::fmt;

use arrayvec::ArrayVec;
use rand::{Rng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use super::{card::Card, hand::Hand};

/// Width and height of the square board.
pub const BOARD_SIZE: usize = 10;

/// Largest valid coordinate on either axis.
pub const MAX_INDEX: usize = BOARD_SIZE - 1;

/// Number of cells on each side of a cell that sequence detection and the
/// fitness heuristics look at.
pub const AXIS_REACH: usize = 4;

/// Number of aligned cells that form a sequence.
pub const SEQUENCE_LEN: usize = 5;

/// One of the two teams. Seat `i` plays for team `i % 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    #[display("Team 1")]
    First,
    #[display("Team 2")]
    Second,
}

impl Team {
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    #[must_use]
    pub const fn from_seat(seat: usize) -> Self {
        if seat % 2 == 0 {
            Self::First
        } else {
            Self::Second
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("position ({x}, {y}) is outside the {BOARD_SIZE}x{BOARD_SIZE} board")]
pub struct PositionError {
    pub x: usize,
    pub y: usize,
}

/// A 0-based board coordinate. `x` selects the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    x: usize,
    y: usize,
}

impl Position {
    /// Creates a position.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is greater than [`MAX_INDEX`].
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        assert!(x <= MAX_INDEX && y <= MAX_INDEX);
        Self { x, y }
    }

    pub const fn try_new(x: usize, y: usize) -> Result<Self, PositionError> {
        if x <= MAX_INDEX && y <= MAX_INDEX {
            Ok(Self { x, y })
        } else {
            Err(PositionError { x, y })
        }
    }

    /// Builds a position from raw decoded values, clamping each to [`MAX_INDEX`].
    #[must_use]
    pub fn clamped(x: u32, y: u32) -> Self {
        let clamp = |v: u32| usize::try_from(v).map_or(MAX_INDEX, |v| v.min(MAX_INDEX));
        Self {
            x: clamp(x),
            y: clamp(y),
        }
    }

    #[must_use]
    pub const fn x(self) -> usize {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> usize {
        self.y
    }

    #[must_use]
    pub const fn is_corner(self) -> bool {
        (self.x == 0 || self.x == MAX_INDEX) && (self.y == 0 || self.y == MAX_INDEX)
    }

    /// Iterates over every board position, column by column.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Position { x, y }))
    }

    fn offset(self, dx: isize, dy: isize, steps: usize) -> Option<Self> {
        let steps = isize::try_from(steps).ok()?;
        let x = self.x.checked_add_signed(dx * steps)?;
        let y = self.y.checked_add_signed(dy * steps)?;
        Self::try_new(x, y).ok()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A line direction through a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Along a column (y increases).
    Vertical,
    /// Along a row (x increases).
    Horizontal,
    /// x and y increase together.
    Diagonal,
    /// x increases while y decreases.
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Self; 4] = [
        Self::Vertical,
        Self::Horizontal,
        Self::Diagonal,
        Self::AntiDiagonal,
    ];

    const fn step(self) -> (isize, isize) {
        match self {
            Self::Vertical => (0, 1),
            Self::Horizontal => (1, 0),
            Self::Diagonal => (1, 1),
            Self::AntiDiagonal => (1, -1),
        }
    }

    /// Returns the cells on this axis within [`AXIS_REACH`] of `center`, clipped
    /// to the board, in ascending order along the axis.
    ///
    /// ```
    /// use sequence_engine::{Axis, Position};
    ///
    /// let span = Axis::Horizontal.span(Position::new(2, 5));
    /// assert_eq!(span.len(), 7);
    /// assert_eq!(span[0], Position::new(0, 5));
    /// assert_eq!(span[6], Position::new(6, 5));
    /// ```
    #[must_use]
    pub fn span(self, center: Position) -> ArrayVec<Position, { 2 * AXIS_REACH + 1 }> {
        let (dx, dy) = self.step();
        let back = (1..=AXIS_REACH)
            .take_while(|&k| center.offset(-dx, -dy, k).is_some())
            .count();
        let mut span = ArrayVec::new();
        for k in (1..=back).rev() {
            span.extend(center.offset(-dx, -dy, k));
        }
        span.push(center);
        for k in 1..=AXIS_REACH {
            let Some(pos) = center.offset(dx, dy, k) else {
                break;
            };
            span.push(pos);
        }
        span
    }
}

/// What a board cell shows.
///
/// The text form is the card label, or `*` for a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLabel {
    /// One of the four free corners, never playable.
    Corner,
    Card(Card),
}

impl CellLabel {
    /// Marker used for corners in the text form.
    pub const CORNER_MARKER: &str = "*";

    #[must_use]
    pub const fn card(self) -> Option<Card> {
        match self {
            Self::Corner => None,
            Self::Card(card) => Some(card),
        }
    }
}

impl fmt::Display for CellLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corner => f.write_str(Self::CORNER_MARKER),
            Self::Card(card) => fmt::Display::fmt(card, f),
        }
    }
}

impl Serialize for CellLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s == Self::CORNER_MARKER {
            return Ok(Self::Corner);
        }
        s.parse()
            .map(Self::Card)
            .map_err(|e| serde::de::Error::custom(format!("invalid cell label '{s}': {e}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    label: CellLabel,
    occupant: Option<Team>,
    locked: bool,
}

impl Cell {
    const CORNER: Self = Self::new(CellLabel::Corner);

    const fn new(label: CellLabel) -> Self {
        Self {
            label,
            occupant: None,
            locked: false,
        }
    }

    #[must_use]
    pub const fn label(&self) -> CellLabel {
        self.label
    }

    #[must_use]
    pub const fn occupant(&self) -> Option<Team> {
        self.occupant
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub const fn is_corner(&self) -> bool {
        matches!(self.label, CellLabel::Corner)
    }
}

/// Why a move is or is not allowed; see [`Board::classify`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum MoveReason {
    #[display("corner cells cannot be played")]
    Corner,
    #[display("cell is part of a completed sequence")]
    Locked,
    #[display("cell already holds your team's token")]
    Own,
    #[display("cell holds an opposing token")]
    Taken,
    #[display("matching card in hand")]
    Card,
    #[display("wild joker in hand")]
    Joker,
    #[display("no matching card or joker in hand")]
    Unplayable,
}

/// Result of classifying a move: legality plus the rule that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCheck {
    pub legal: bool,
    pub reason: MoveReason,
}

impl MoveCheck {
    const fn legal(reason: MoveReason) -> Self {
        Self {
            legal: true,
            reason,
        }
    }

    const fn illegal(reason: MoveReason) -> Self {
        Self {
            legal: false,
            reason,
        }
    }
}

/// The 10×10 playing surface.
///
/// The four corners are free cells. The 96 other cells show the 96 non-Jack
/// cards (12 ranks × 4 suits × 2 deck origins), so every exact label appears
/// once and every card face twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Number of cells that show a card.
    pub const CARD_CELLS: usize = BOARD_SIZE * BOARD_SIZE - 4;

    /// Lays out a freshly shuffled set of board cards.
    pub fn shuffled<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut cards = Card::board_cards().collect::<Vec<_>>();
        cards.shuffle(rng);
        Self::with_cards(cards)
    }

    /// Places `cards` on the non-corner cells column by column.
    ///
    /// # Panics
    ///
    /// Panics unless exactly [`Self::CARD_CELLS`] cards are supplied.
    #[must_use]
    pub fn with_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        let mut cards = cards.into_iter();
        let mut columns = [[Cell::CORNER; BOARD_SIZE]; BOARD_SIZE];
        for pos in Position::all().filter(|pos| !pos.is_corner()) {
            let card = cards.next().expect("too few cards for the board layout");
            columns[pos.x][pos.y] = Cell::new(CellLabel::Card(card));
        }
        assert!(cards.next().is_none(), "too many cards for the board layout");
        Self { columns }
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> &Cell {
        &self.columns[pos.x][pos.y]
    }

    /// Iterates over every cell with its position, column by column.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        Position::all().map(|pos| (pos, self.cell(pos)))
    }

    /// Puts `team`'s token on `pos`, replacing any token already there.
    ///
    /// This bypasses the turn rules; [`Game::play_turn`](crate::Game::play_turn)
    /// is the rule-checked way to place tokens.
    pub fn place_token(&mut self, pos: Position, team: Team) {
        self.columns[pos.x][pos.y].occupant = Some(team);
    }

    pub fn remove_token(&mut self, pos: Position) {
        self.columns[pos.x][pos.y].occupant = None;
    }

    pub(crate) fn lock(&mut self, pos: Position) {
        self.columns[pos.x][pos.y].locked = true;
    }

    /// Decides whether `team`, holding `hand`, may play at `pos`.
    ///
    /// Rules are checked in order: corner, locked, own token, opposing token
    /// (needs a remover), then open cell (needs the card or a joker).
    ///
    /// ```
    /// use sequence_engine::{Board, Card, Hand, MoveReason, Position, Team};
    ///
    /// let board = Board::with_cards(Card::board_cards());
    /// let hand = Hand::default();
    /// let check = board.classify(Position::new(0, 0), Team::First, &hand);
    /// assert!(!check.legal);
    /// assert_eq!(check.reason, MoveReason::Corner);
    /// ```
    #[must_use]
    pub fn classify(&self, pos: Position, team: Team, hand: &Hand) -> MoveCheck {
        let cell = self.cell(pos);
        let CellLabel::Card(card) = cell.label else {
            return MoveCheck::illegal(MoveReason::Corner);
        };
        if cell.locked {
            return MoveCheck::illegal(MoveReason::Locked);
        }
        match cell.occupant {
            Some(occupant) if occupant == team => MoveCheck::illegal(MoveReason::Own),
            Some(_) => MoveCheck {
                legal: hand.contains_remover(),
                reason: MoveReason::Taken,
            },
            None if hand.contains(card) => MoveCheck::legal(MoveReason::Card),
            None if hand.contains_joker() => MoveCheck::legal(MoveReason::Joker),
            None => MoveCheck::illegal(MoveReason::Unplayable),
        }
    }

    /// Lists every position where `team`, holding `hand`, has a legal move.
    pub fn legal_positions<'a>(
        &'a self,
        team: Team,
        hand: &'a Hand,
    ) -> impl Iterator<Item = Position> + 'a {
        Position::all().filter(move |&pos| self.classify(pos, team, hand).legal)
    }

    /// Positions of the cells showing the same face as `card` (two for any
    /// non-Jack card, none for a Jack).
    pub fn face_positions(&self, card: Card) -> impl Iterator<Item = Position> + '_ {
        self.cells()
            .filter(move |(_, cell)| cell.label.card().is_some_and(|c| c.same_face(card)))
            .map(|(pos, _)| pos)
    }

    /// Position of the single cell carrying exactly this label.
    #[must_use]
    pub fn find_label(&self, card: Card) -> Option<Position> {
        self.cells()
            .find(|(_, cell)| cell.label == CellLabel::Card(card))
            .map(|(pos, _)| pos)
    }

    /// Returns `true` if `card` could still be used somewhere: Jacks always,
    /// other cards while at least one cell showing their face is unoccupied.
    #[must_use]
    pub fn card_is_playable(&self, card: Card) -> bool {
        if card.is_jack() {
            return true;
        }
        self.face_positions(card)
            .any(|pos| self.cell(pos).occupant.is_none())
    }
}
