//! Computer players: fitness functions, move search and AI-only sessions.
//!
//! This crate puts the game engine and the genetic search together in three
//! levels:
//!
//! 1. **Fitness** ([`fitness`]) - Scores one candidate cell for the seat to play
//!    by reading the board around it, or by returning noise.
//!
//! 2. **Move Selection** ([`move_selector`]) - Runs a genetic search under a
//!    fitness function and retries until the picked cell is legal.
//!
//! 3. **Sessions** ([`session`]) - Plays whole games between computer seats.
//!
//! # Architecture
//!
//! ```text
//! Session (AI-only game loop)
//!     ↓ asks each seat's
//! Move Selector (search + legality retry)
//!     ↓ evolves chromosomes under
//! Fitness (score a raw (x, y))
//! ```
//!
//! # Current Limitations
//!
//! - **Greedy**: a seat looks at the board as it is now; it never plans for its
//!   next turn or for its partner's
//! - **Hand-blind heuristic**: the heuristic weighs token density only, not
//!   which cards the seat holds beyond whether the cell is legal
//! - **Retry cost**: late in a game few cells are legal and each retry reruns a
//!   full search

pub mod fitness;
pub mod move_selector;
pub mod session;
