//! Double-loss penalty model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityId, PenaltyId, PlayerId, RecordError};

/// Which pool a penalty was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenaltyType {
    /// Veteran pool
    Regular,
    Beginner,
}

impl fmt::Display for PenaltyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenaltyType::Regular => write!(f, "regular"),
            PenaltyType::Beginner => write!(f, "beginner"),
        }
    }
}

impl FromStr for PenaltyType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "regular" | "veteran" => Ok(PenaltyType::Regular),
            "beginner" => Ok(PenaltyType::Beginner),
            _ => Err(RecordError::UnknownPenaltyType(s.to_string())),
        }
    }
}

/// A double-loss infraction recorded against a player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PenaltyRecord {
    pub id: PenaltyId,
    pub player_id: PlayerId,
    pub penalty_type: PenaltyType,

    /// Free-form admin note
    #[serde(default)]
    pub note: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl PenaltyRecord {
    pub fn new(player_id: PlayerId, penalty_type: PenaltyType) -> Self {
        let created_at = Utc::now();
        // Penalties have no natural key: the same player can be penalised
        // twice in one event.
        let id = EntityId::generate(&[
            "penalty",
            player_id.as_str(),
            &created_at.to_rfc3339(),
            &Uuid::new_v4().to_string(),
        ]);

        Self {
            id,
            player_id,
            penalty_type,
            note: None,
            created_at,
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_penalty_type_parse() {
        assert_eq!("regular".parse::<PenaltyType>(), Ok(PenaltyType::Regular));
        assert_eq!("veteran".parse::<PenaltyType>(), Ok(PenaltyType::Regular));
        assert_eq!("BEGINNER".parse::<PenaltyType>(), Ok(PenaltyType::Beginner));
        assert!("yellow".parse::<PenaltyType>().is_err());
    }

    #[test]
    fn test_penalty_ids_are_unique() {
        let a = PenaltyRecord::new(EntityId::from("player-1"), PenaltyType::Regular);
        let b = PenaltyRecord::new(EntityId::from("player-1"), PenaltyType::Regular);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_penalty_serialization() {
        let penalty = PenaltyRecord::new(EntityId::from("player-1"), PenaltyType::Beginner)
            .with_note("Slow play".to_string());

        let json = serde_json::to_string(&penalty).unwrap();
        assert!(json.contains("\"penalty_type\":\"beginner\""));

        let back: PenaltyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, penalty.id);
        assert_eq!(back.note.as_deref(), Some("Slow play"));
    }
}
