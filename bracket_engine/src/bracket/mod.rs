//! Bracket advancement mapping.
//!
//! Derives, for each knockout match, which next-round match its winner and
//! loser move into, purely from the placeholders sitting in next-round
//! slots.

pub mod advancement;

pub use advancement::{Advancement, map_advancement, rounds};
