//! Ranking and tiering engine.
//!
//! Computes derived metrics from stored tournament data:
//! - Per-player aggregates (placements, TOPs, points, penalties)
//! - Performance and penalty rankings
//! - S/A/B/C/D tier classification
//! - Deck usage
//!
//! Everything here is a pure function of its inputs.

mod aggregate;
mod compare;
mod decks;
mod tier;

pub use aggregate::*;
pub use compare::*;
pub use decks::*;
pub use tier::*;
