use std::{collections::VecDeque, fmt::Write as _, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::card::Card;

/// The draw pile.
///
/// Holds the 104 labels of the two combined decks (Jacks included). Cards are
/// drawn from the front; a drawn card that cannot be used is cycled to the tail
/// instead of being reshuffled.
///
/// # Example
///
/// ```
/// use sequence_engine::Deck;
///
/// let mut deck = Deck::ordered();
/// let first = deck.draw().unwrap();
/// deck.cycle_to_tail(first);
/// assert_eq!(deck.len(), 104);
/// assert_eq!(deck.cards().last(), Some(&first));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Number of cards in a full deck.
    pub const LEN: usize = 104;

    /// Creates a full deck in rank-major order.
    #[must_use]
    pub fn ordered() -> Self {
        Self::from_cards(Card::full_deck())
    }

    /// Creates a full deck shuffled with `rng`.
    pub fn shuffled<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut cards = Card::full_deck().collect::<Vec<_>>();
        cards.shuffle(rng);
        Self::from_cards(cards)
    }

    /// Creates a deck whose front is the first card of `cards`.
    #[must_use]
    pub fn from_cards<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the remaining cards from front (next draw) to tail.
    pub fn cards(&self) -> impl DoubleEndedIterator<Item = &Card> + ExactSizeIterator + '_ {
        self.cards.iter()
    }

    /// Removes and returns the front card, or `None` when the pile is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Puts a drawn card back at the tail of the pile.
    pub fn cycle_to_tail(&mut self, card: Card) {
        self.cards.push_back(card);
    }
}

/// Seed for a deterministic game.
///
/// A 128-bit (16-byte) seed from which the board layout, the deck shuffle and
/// any AI randomness are derived. It serializes as a 32-character hex string.
///
/// # Example
///
/// ```
/// use sequence_engine::{Game, GameSeed};
/// use rand::Rng as _;
///
/// let seed: GameSeed = rand::rng().random();
/// let a = Game::with_seed(2, seed).unwrap();
/// let b = Game::with_seed(2, seed).unwrap();
/// assert_eq!(a.board(), b.board());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSeed([u8; 16]);

impl GameSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    fn to_hex(self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        hex_str
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed '{input}': {reason}")]
pub struct GameSeedParseError {
    input: String,
    reason: String,
}

impl FromStr for GameSeed {
    type Err = GameSeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = |reason: String| GameSeedParseError {
            input: s.to_owned(),
            reason,
        };
        if s.len() != 32 {
            return Err(error(format!("expected 32 characters, got {}", s.len())));
        }
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(error("expected only hex digits".to_owned()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|e| error(e.to_string()))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl std::fmt::Display for GameSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for GameSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for GameSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `GameSeed` values with `rng.random()`.
impl Distribution<GameSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GameSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GameSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{Rng as _, SeedableRng as _};
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_shuffled_deck_holds_every_label_once() {
        let mut rng = Pcg32::seed_from_u64(7);
        let deck = Deck::shuffled(&mut rng);
        assert_eq!(deck.len(), Deck::LEN);
        assert_eq!(deck.cards().collect::<HashSet<_>>().len(), Deck::LEN);
        assert_eq!(deck.cards().filter(|c| c.is_jack()).count(), 8);
        assert_ne!(deck, Deck::ordered());
    }

    #[test]
    fn test_draw_from_front_cycle_to_tail() {
        let cards = ["2c0", "3c0", "4c0"].map(|l| l.parse::<Card>().unwrap());
        let mut deck = Deck::from_cards(cards);
        assert_eq!(deck.draw(), Some(cards[0]));
        deck.cycle_to_tail(cards[0]);
        assert_eq!(
            deck.cards().copied().collect::<Vec<_>>(),
            [cards[1], cards[2], cards[0]]
        );
        deck.draw();
        deck.draw();
        deck.draw();
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), None);
    }

    mod game_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: GameSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: GameSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = GameSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_accepts_uppercase() {
            let seed: GameSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_bytes()[0], 0x01);
            assert_eq!(seed.to_bytes()[15], 0x10);
        }

        #[test]
        fn test_error_invalid_input() {
            for json in [
                "\"ghijklmnopqrstuvwxyzghijklmnopqr\"",
                "\"0123456789abcdef0123456789abcde\"",
                "\"0123456789abcdef0123456789abcdef0\"",
                "\"\"",
            ] {
                let err = serde_json::from_str::<GameSeed>(json).unwrap_err();
                assert!(err.to_string().contains("invalid hex"), "{err}");
            }
        }

        #[test]
        fn test_parse_rejects_sign() {
            let input = "+0123456789abcdef0123456789abcde";
            assert_eq!(input.len(), 32);
            let err = input.parse::<GameSeed>().unwrap_err();
            assert!(err.to_string().contains("only hex digits"), "{err}");
        }
    }
}
