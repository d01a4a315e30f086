pub use self::{core::*, engine::*};

#[cfg(test)]
mod arbitrary;
pub mod core;
pub mod engine;
