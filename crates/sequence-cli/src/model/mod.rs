pub mod seat;
pub mod summary;
