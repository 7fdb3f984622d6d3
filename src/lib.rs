//! # Duel Ranking
//!
//! A local Yu-Gi-Oh! event tracker: player rosters, tournament results,
//! deck usage and double-loss penalties, with derived rankings and
//! S/A/B/C/D tiers.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, tournaments, results, penalties, stats)
//! - **calculate**: Aggregation, ranking and tier classification
//! - **storage**: Filesystem record store (JSONL) and snapshots
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
