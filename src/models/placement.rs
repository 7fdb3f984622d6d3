//! Tournament placement model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, PlacementId, PlayerId, TournamentId};

/// One player's result in one tournament.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Unique identifier (derived from tournament_id + player_id)
    pub id: PlacementId,

    /// Tournament this result belongs to
    pub tournament_id: TournamentId,

    /// Player who achieved it
    pub player_id: PlayerId,

    /// Final standing. `None` means the player entered but did not reach the top 4.
    #[serde(default)]
    pub placement: Option<i32>,

    /// Deck the player registered
    #[serde(default)]
    pub deck: Option<String>,

    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl PlacementRecord {
    /// Create a participation record without a placement.
    pub fn new(tournament_id: TournamentId, player_id: PlayerId) -> Self {
        let id = EntityId::generate(&["placement", tournament_id.as_str(), player_id.as_str()]);

        Self {
            id,
            tournament_id,
            player_id,
            placement: None,
            deck: None,
            created_at: Utc::now(),
        }
    }

    /// Builder method to set placement.
    pub fn with_placement(mut self, placement: i32) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Builder method to set deck.
    pub fn with_deck(mut self, deck: String) -> Self {
        self.deck = Some(deck);
        self
    }

    /// The placement, if it is one of the top 4 slots.
    pub fn top_slot(&self) -> Option<i32> {
        self.placement.filter(|p| (1..=4).contains(p))
    }

    /// Check if this is a TOP finish (1st to 4th).
    pub fn is_top(&self) -> bool {
        self.top_slot().is_some()
    }

    /// Check if this is a win (1st place).
    pub fn is_winner(&self) -> bool {
        self.placement == Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PlacementRecord {
        PlacementRecord::new(EntityId::from("tournament-1"), EntityId::from("player-1"))
    }

    #[test]
    fn test_participation_only() {
        let r = record();
        assert_eq!(r.placement, None);
        assert!(!r.is_top());
        assert!(!r.is_winner());
    }

    #[test]
    fn test_top_slots() {
        for p in 1..=4 {
            assert!(record().with_placement(p).is_top());
        }
        assert!(record().with_placement(1).is_winner());
        assert!(!record().with_placement(2).is_winner());
    }

    #[test]
    fn test_out_of_range_placement_is_not_top() {
        assert_eq!(record().with_placement(0).top_slot(), None);
        assert_eq!(record().with_placement(5).top_slot(), None);
        assert_eq!(record().with_placement(-1).top_slot(), None);
    }

    #[test]
    fn test_placement_id_ignores_result() {
        let a = record().with_placement(1);
        let b = record().with_placement(3).with_deck("Snake-Eye".to_string());
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn test_placement_deserializes_null_and_missing() {
        let json = r#"{"id":"x","tournament_id":"t","player_id":"p","placement":null,"created_at":"2024-01-01T00:00:00Z"}"#;
        let r: PlacementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.placement, None);
        assert_eq!(r.deck, None);

        let json = r#"{"id":"x","tournament_id":"t","player_id":"p","created_at":"2024-01-01T00:00:00Z"}"#;
        let r: PlacementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.placement, None);
    }
}
