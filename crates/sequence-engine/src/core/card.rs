use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Rank of a [`Card`], ordered from `2` to `A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const LEN: usize = 13;

    pub const ALL: [Self; Self::LEN] = [
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Jack,
        Self::Queen,
        Self::King,
        Self::Ace,
    ];

    const SYMBOLS: [char; Self::LEN] = [
        '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A',
    ];

    #[must_use]
    pub const fn as_char(self) -> char {
        Self::SYMBOLS[self as usize]
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let index = Self::SYMBOLS.iter().position(|&s| s == c)?;
        Some(Self::ALL[index])
    }
}

/// Suit of a [`Card`]: clubs, diamonds, hearts, spades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const LEN: usize = 4;

    pub const ALL: [Self; Self::LEN] = [Self::Clubs, Self::Diamonds, Self::Hearts, Self::Spades];

    const SYMBOLS: [char; Self::LEN] = ['c', 'd', 'h', 's'];

    #[must_use]
    pub const fn as_char(self) -> char {
        Self::SYMBOLS[self as usize]
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let index = Self::SYMBOLS.iter().position(|&s| s == c)?;
        Some(Self::ALL[index])
    }
}

/// Which of the two physical decks a card came from.
///
/// For Jacks the origin decides the card's power: a Jack from the first deck is
/// a one-eyed remover, a Jack from the second deck a two-eyed wild joker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DeckOrigin {
    First,
    Second,
}

impl DeckOrigin {
    pub const LEN: usize = 2;

    pub const ALL: [Self; Self::LEN] = [Self::First, Self::Second];

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::First => '0',
            Self::Second => '1',
        }
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::First),
            '1' => Some(Self::Second),
            _ => None,
        }
    }
}

/// Rank and suit of a card, without its deck origin.
///
/// Ordering is by rank first, then suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardFace {
    pub rank: Rank,
    pub suit: Suit,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CardParseError {
    #[display("card label must be 3 characters, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid rank: {symbol:?}")]
    InvalidRank { symbol: char },
    #[display("invalid suit: {symbol:?}")]
    InvalidSuit { symbol: char },
    #[display("invalid deck origin: {symbol:?}")]
    InvalidDeck { symbol: char },
}

/// A playing card identified by rank, suit and deck origin.
///
/// The canonical text form is the 3-character label `<rank><suit><origin>`,
/// e.g. `Th0` or `Js1`.
///
/// Two notions of equality are in use and they are deliberately kept apart:
///
/// - `==` compares the exact label (all three components). It is used to locate
///   board cells and to recognise a card coming round again in the deck.
/// - [`Card::same_face`] ignores the deck origin. Hands use it for membership
///   and removal, so a `5h1` in hand can pay for a `5h0` cell.
///
/// ```
/// use sequence_engine::Card;
///
/// let a: Card = "5h0".parse().unwrap();
/// let b: Card = "5h1".parse().unwrap();
/// assert_ne!(a, b);
/// assert!(a.same_face(b));
/// assert_eq!(a.to_string(), "5h0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    rank: Rank,
    suit: Suit,
    origin: DeckOrigin,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit, origin: DeckOrigin) -> Self {
        Self { rank, suit, origin }
    }

    /// Parses a card from its 3-character label.
    pub fn from_label(label: &str) -> Result<Self, CardParseError> {
        let chars = label.chars().collect::<Vec<_>>();
        let &[rank, suit, origin] = chars.as_slice() else {
            return Err(CardParseError::InvalidLength { len: chars.len() });
        };
        let rank = Rank::from_char(rank).ok_or(CardParseError::InvalidRank { symbol: rank })?;
        let suit = Suit::from_char(suit).ok_or(CardParseError::InvalidSuit { symbol: suit })?;
        let origin =
            DeckOrigin::from_char(origin).ok_or(CardParseError::InvalidDeck { symbol: origin })?;
        Ok(Self::new(rank, suit, origin))
    }

    #[must_use]
    pub const fn rank(self) -> Rank {
        self.rank
    }

    #[must_use]
    pub const fn suit(self) -> Suit {
        self.suit
    }

    #[must_use]
    pub const fn origin(self) -> DeckOrigin {
        self.origin
    }

    #[must_use]
    pub const fn face(self) -> CardFace {
        CardFace {
            rank: self.rank,
            suit: self.suit,
        }
    }

    /// Returns `true` if both cards share rank and suit, whatever their deck origin.
    #[must_use]
    pub fn same_face(self, other: Card) -> bool {
        self.face() == other.face()
    }

    #[must_use]
    pub fn is_jack(self) -> bool {
        self.rank == Rank::Jack
    }

    /// One-eyed Jack: evicts an opposing token.
    #[must_use]
    pub fn is_remover(self) -> bool {
        self.is_jack() && self.origin == DeckOrigin::First
    }

    /// Two-eyed Jack: stands in for any open cell's card.
    #[must_use]
    pub fn is_joker(self) -> bool {
        self.is_jack() && self.origin == DeckOrigin::Second
    }

    /// Every rank × suit × origin combination, in rank-major order (104 cards).
    pub fn full_deck() -> impl Iterator<Item = Card> {
        Rank::ALL.into_iter().flat_map(|rank| {
            Suit::ALL.into_iter().flat_map(move |suit| {
                DeckOrigin::ALL
                    .into_iter()
                    .map(move |origin| Card::new(rank, suit, origin))
            })
        })
    }

    /// The cards printed on the board: the full deck without Jacks (96 cards).
    pub fn board_cards() -> impl Iterator<Item = Card> {
        Self::full_deck().filter(|card| !card.is_jack())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.rank.as_char(),
            self.suit.as_char(),
            self.origin.as_char()
        )
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s)
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Card::from_label(&s)
            .map_err(|e| serde::de::Error::custom(format!("invalid card label '{s}': {e}")))
    }
}
