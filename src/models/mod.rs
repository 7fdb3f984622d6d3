//! Core data models for the duel ranking tracker.

mod error;
mod ids;
mod penalty;
mod placement;
mod player;
mod scope;
mod stats;
mod tournament;

pub use error::*;
pub use ids::*;
pub use penalty::*;
pub use placement::*;
pub use player::*;
pub use scope::*;
pub use stats::*;
pub use tournament::*;
