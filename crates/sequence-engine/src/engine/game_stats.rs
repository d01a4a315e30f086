use serde::Serialize;

use crate::core::Team;

/// Number of sequences a team needs to win.
pub const WIN_THRESHOLD: usize = 2;

/// Per-game counters.
///
/// - **Scores**: completed sequences per team
/// - **Turns**: turns fully played
/// - **Placements / removals**: tokens put down and taken off
/// - **Cycled cards**: unplayable draws sent to the tail of the deck
///
/// # Example
///
/// ```
/// use sequence_engine::{GameStats, Team};
///
/// let mut stats = GameStats::new();
/// stats.add_sequences(Team::Second, 2);
///
/// assert_eq!(stats.score(Team::Second), 2);
/// assert_eq!(stats.winner(), Some(Team::Second));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GameStats {
    scores: [usize; 2],
    turns: usize,
    placements: usize,
    removals: usize,
    cycled_cards: usize,
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scores: [0; 2],
            turns: 0,
            placements: 0,
            removals: 0,
            cycled_cards: 0,
        }
    }

    #[must_use]
    pub const fn scores(&self) -> [usize; 2] {
        self.scores
    }

    #[must_use]
    pub const fn score(&self, team: Team) -> usize {
        self.scores[team.index()]
    }

    #[must_use]
    pub const fn turns(&self) -> usize {
        self.turns
    }

    #[must_use]
    pub const fn placements(&self) -> usize {
        self.placements
    }

    #[must_use]
    pub const fn removals(&self) -> usize {
        self.removals
    }

    #[must_use]
    pub const fn cycled_cards(&self) -> usize {
        self.cycled_cards
    }

    /// Returns the first team whose score reached [`WIN_THRESHOLD`].
    #[must_use]
    pub fn winner(&self) -> Option<Team> {
        Team::ALL
            .into_iter()
            .find(|&team| self.score(team) >= WIN_THRESHOLD)
    }

    pub const fn add_sequences(&mut self, team: Team, count: usize) {
        self.scores[team.index()] += count;
    }

    pub(crate) const fn record_placement(&mut self) {
        self.placements += 1;
    }

    pub(crate) const fn record_removal(&mut self) {
        self.removals += 1;
    }

    pub(crate) const fn record_cycled(&mut self, count: usize) {
        self.cycled_cards += count;
    }

    pub(crate) const fn complete_turn(&mut self) {
        self.turns += 1;
    }
}
