pub use self::{board::*, card::*, deck::*, hand::*};

pub(crate) mod board;
pub(crate) mod card;
pub(crate) mod deck;
pub(crate) mod hand;
