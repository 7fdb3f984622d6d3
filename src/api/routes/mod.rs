pub mod decks;
pub mod penalties;
pub mod players;
pub mod ranking;
pub mod tournaments;
