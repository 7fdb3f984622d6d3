//! Filesystem record store.
//!
//! Players, tournaments, results and penalties live as JSON Lines files
//! under `<data_dir>/normalized/`. Rankings are never stored; they are
//! recomputed from a [`Snapshot`] of these files.

mod jsonl;
mod records;
mod snapshot;

pub use jsonl::*;
pub use records::*;
pub use snapshot::*;

#[cfg(test)]
pub(crate) use snapshot::fixtures;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::TournamentKind;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown {entity}: {id}")]
    UnknownRecord { entity: &'static str, id: String },

    #[error("Tournament {id} is already a {existing} event, not {requested}")]
    KindConflict {
        id: String,
        existing: TournamentKind,
        requested: TournamentKind,
    },
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn normalized_dir(&self) -> PathBuf {
        self.data_dir.join("normalized")
    }

    /// Path of the file holding one entity type.
    pub fn entity_path(&self, entity: EntityType) -> PathBuf {
        self.normalized_dir().join(entity.filename())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_paths() {
        let config = StorageConfig::new(PathBuf::from("/data"));

        assert_eq!(config.normalized_dir(), PathBuf::from("/data/normalized"));
        assert_eq!(
            config.entity_path(EntityType::Penalty),
            PathBuf::from("/data/normalized/penalties.jsonl")
        );
    }

    #[test]
    fn test_storage_config_default() {
        let config = StorageConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
    }

    #[test]
    fn test_unknown_record_message() {
        let err = StorageError::UnknownRecord {
            entity: "player",
            id: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown player: abc");
    }
}
