use serde::{Deserialize, Serialize};

use super::card::Card;

/// The cards held by one seat, in the order they were received.
///
/// Membership and removal of a specific card use face equality
/// ([`Card::same_face`]), so either copy of a face pays for either board cell
/// showing it.
///
/// The `play_*` methods are the only way cards leave a hand. Each removes the
/// first matching card in hand order and panics if there is none: gate the call
/// on the corresponding `contains*` check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    #[must_use]
    pub fn contains(&self, card: Card) -> bool {
        self.cards.iter().any(|c| c.same_face(card))
    }

    #[must_use]
    pub fn contains_remover(&self) -> bool {
        self.cards.iter().any(|c| c.is_remover())
    }

    #[must_use]
    pub fn contains_joker(&self) -> bool {
        self.cards.iter().any(|c| c.is_joker())
    }

    /// Removes and returns the first card with the same face as `card`.
    pub fn play_exact(&mut self, card: Card) -> Card {
        self.take_first(|c| c.same_face(card))
            .unwrap_or_else(|| panic!("hand {self:?} holds no {card}"))
    }

    /// Removes and returns the first one-eyed Jack.
    pub fn play_first_remover(&mut self) -> Card {
        self.take_first(|c| c.is_remover())
            .unwrap_or_else(|| panic!("hand {self:?} holds no remover"))
    }

    /// Removes and returns the first two-eyed Jack.
    pub fn play_first_joker(&mut self) -> Card {
        self.take_first(|c| c.is_joker())
            .unwrap_or_else(|| panic!("hand {self:?} holds no joker"))
    }

    fn take_first<F>(&mut self, f: F) -> Option<Card>
    where
        F: Fn(&Card) -> bool,
    {
        let index = self.cards.iter().position(f)?;
        Some(self.cards.remove(index))
    }

    /// Returns the hand sorted by face (rank, then suit), for display.
    #[must_use]
    pub fn sorted_by_face(&self) -> Vec<Card> {
        let mut cards = self.cards.clone();
        cards.sort_by_key(|c| c.face());
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(labels: &[&str]) -> Hand {
        Hand::new(labels.iter().map(|l| l.parse().unwrap()).collect())
    }

    fn card(label: &str) -> Card {
        label.parse().unwrap()
    }

    #[test]
    fn test_contains_by_face() {
        let h = hand(&["5h1", "Kc0"]);
        assert!(h.contains(card("5h0")));
        assert!(h.contains(card("5h1")));
        assert!(h.contains(card("Kc1")));
        assert!(!h.contains(card("5d1")));
    }

    #[test]
    fn test_play_exact_removes_first_face_match_in_order() {
        let mut h = hand(&["2c0", "7s1", "7s0", "Ad0"]);
        let played = h.play_exact(card("7s0"));
        // first in hand order, not the exact label
        assert_eq!(played, card("7s1"));
        assert_eq!(h.cards(), hand(&["2c0", "7s0", "Ad0"]).cards());
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn test_play_remover_and_joker() {
        let mut h = hand(&["Jh1", "3d0", "Jc0", "Js0"]);
        assert!(h.contains_remover());
        assert!(h.contains_joker());

        assert_eq!(h.play_first_remover(), card("Jc0"));
        assert_eq!(h.play_first_joker(), card("Jh1"));
        assert!(h.contains_remover());
        assert!(!h.contains_joker());
        assert_eq!(h.cards(), hand(&["3d0", "Js0"]).cards());
    }

    #[test]
    fn test_add_appends_to_end() {
        let mut h = Hand::default();
        assert!(h.is_empty());
        h.add(card("4c0"));
        h.add(card("2d1"));
        assert_eq!(h.cards().last(), Some(&card("2d1")));
    }

    #[test]
    #[should_panic(expected = "holds no remover")]
    fn test_play_remover_without_one_panics() {
        let mut h = hand(&["Jh1", "3d0"]);
        h.play_first_remover();
    }

    #[test]
    #[should_panic(expected = "holds no")]
    fn test_play_exact_without_match_panics() {
        let mut h = hand(&["3d0"]);
        h.play_exact(card("4d0"));
    }

    #[test]
    fn test_sorted_by_face() {
        let h = hand(&["Ah0", "2s1", "Tc0", "2c0"]);
        let labels = h
            .sorted_by_face()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(labels, ["2c0", "2s1", "Tc0", "Ah0"]);
    }
}
