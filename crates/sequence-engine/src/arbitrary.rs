use crate::{Board, Card, DeckOrigin, Hand, Position, Rank, Suit, Team};

impl quickcheck::Arbitrary for Card {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Card::new(
            *g.choose(&Rank::ALL).unwrap(),
            *g.choose(&Suit::ALL).unwrap(),
            *g.choose(&DeckOrigin::ALL).unwrap(),
        )
    }
}

impl quickcheck::Arbitrary for Team {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Team::ALL).unwrap()
    }
}

/// Tokens and locks to scatter over a board.
#[derive(Clone, Debug)]
pub struct Occupancy {
    // (x, y, team, locked); corners are skipped on apply
    tokens: Vec<(usize, usize, Team, bool)>,
}

impl Occupancy {
    pub fn apply(&self, board: &mut Board) {
        for &(x, y, team, locked) in &self.tokens {
            let pos = Position::new(x, y);
            if pos.is_corner() {
                continue;
            }
            board.place_token(pos, team);
            if locked {
                board.lock(pos);
            }
        }
    }
}

impl quickcheck::Arbitrary for Occupancy {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let count = usize::arbitrary(g) % 60;
        let tokens = (0..count)
            .map(|_| {
                (
                    usize::arbitrary(g) % 10,
                    usize::arbitrary(g) % 10,
                    Team::arbitrary(g),
                    u8::arbitrary(g) % 4 == 0,
                )
            })
            .collect();
        Occupancy { tokens }
    }
}

/// A hand of up to 7 cards, Jacks included.
#[derive(Clone, Debug)]
pub struct ArbitraryHand(pub Hand);

impl quickcheck::Arbitrary for ArbitraryHand {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let len = usize::arbitrary(g) % 8;
        ArbitraryHand(Hand::new((0..len).map(|_| Card::arbitrary(g)).collect()))
    }
}
