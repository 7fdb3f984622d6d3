//! Derived statistics models.
//!
//! Nothing in here is persisted; every value is recomputed from the
//! stored records whenever a ranking is requested.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Tier classification of a ranked player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    S,
    A,
    B,
    C,
    D,
}

impl Tier {
    pub const ALL: [Tier; 5] = [Tier::S, Tier::A, Tier::B, Tier::C, Tier::D];
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::S => write!(f, "S"),
            Tier::A => write!(f, "A"),
            Tier::B => write!(f, "B"),
            Tier::C => write!(f, "C"),
            Tier::D => write!(f, "D"),
        }
    }
}

/// Per-player counters derived from placement and penalty records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerAggregate {
    pub player_id: PlayerId,
    pub name: String,
    pub image_url: Option<String>,

    /// Tournaments entered within the active scope
    pub total_tournaments: u32,

    pub first_place: u32,
    pub second_place: u32,
    pub third_place: u32,
    pub fourth_place: u32,

    /// first + second + third + fourth
    pub total_tops: u32,

    /// total_tops / total_tournaments * 100, 0 when no tournaments
    pub top_percentage: f64,

    /// 4 per win, 3 per second place, 2 per third or fourth place
    pub points: u32,

    /// Penalties within the active scope
    pub penalties: u32,
}

impl PlayerAggregate {
    /// Whether the player entered at least one tournament in scope.
    pub fn is_eligible(&self) -> bool {
        self.total_tournaments >= 1
    }
}

/// Minimum points required for each capped tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TierThresholds {
    pub s: u32,
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

/// Advisory slot counts for the top three tiers.
///
/// These are only displayed next to the tier occupancy; membership is never
/// capped by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSlots {
    pub s: u32,
    pub a: u32,
    pub b: u32,
}

impl TierSlots {
    pub fn for_tier(&self, tier: Tier) -> Option<u32> {
        match tier {
            Tier::S => Some(self.s),
            Tier::A => Some(self.a),
            Tier::B => Some(self.b),
            Tier::C | Tier::D => None,
        }
    }
}

/// A ranked player with its tier assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredPlayer {
    /// 1-based position in the ranking
    pub rank: u32,

    /// Position as a percentage of the eligible field (0 = best)
    pub percentile: f64,

    pub tier: Option<Tier>,

    #[serde(flatten)]
    pub player: PlayerAggregate,
}

/// Slot usage of one tier, e.g. "2/3 taken".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUsage {
    pub tier: Tier,
    pub occupied: u32,
    pub slots: Option<u32>,
}

/// Output of the tier classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierReport {
    pub avg_points: u32,
    pub thresholds: TierThresholds,
    pub tier_slots: TierSlots,
    pub tiered_players: Vec<TieredPlayer>,
}

impl TierReport {
    /// Number of players assigned to a tier.
    pub fn occupancy(&self, tier: Tier) -> u32 {
        self.tiered_players
            .iter()
            .filter(|p| p.tier == Some(tier))
            .count() as u32
    }

    /// Players in a specific tier, in ranking order.
    pub fn in_tier(&self, tier: Tier) -> Vec<&TieredPlayer> {
        self.tiered_players
            .iter()
            .filter(|p| p.tier == Some(tier))
            .collect()
    }

    pub fn slot_usage(&self) -> Vec<SlotUsage> {
        Tier::ALL
            .iter()
            .map(|&tier| SlotUsage {
                tier,
                occupied: self.occupancy(tier),
                slots: self.tier_slots.for_tier(tier),
            })
            .collect()
    }

    pub fn find(&self, player_id: &PlayerId) -> Option<&TieredPlayer> {
        self.tiered_players
            .iter()
            .find(|p| &p.player.player_id == player_id)
    }
}

/// A player's position in the penalty ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyStanding {
    pub player_id: PlayerId,
    pub name: String,
    pub total_penalties: u32,
    pub total_tournaments: u32,

    /// total_penalties / total_tournaments * 100, 0 when no tournaments
    pub penalty_rate: f64,
}

/// How often a deck was played and how well it did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckUsage {
    pub deck: String,
    pub appearances: u32,
    pub tops: u32,
    pub wins: u32,
    pub top_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiered(name: &str, tier: Option<Tier>) -> TieredPlayer {
        TieredPlayer {
            rank: 1,
            percentile: 0.0,
            tier,
            player: PlayerAggregate {
                player_id: PlayerId::from(name),
                name: name.to_string(),
                image_url: None,
                total_tournaments: 1,
                first_place: 0,
                second_place: 0,
                third_place: 0,
                fourth_place: 0,
                total_tops: 0,
                top_percentage: 0.0,
                points: 0,
                penalties: 0,
            },
        }
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(format!("{}", Tier::S), "S");
        assert_eq!(format!("{}", Tier::D), "D");
    }

    #[test]
    fn test_tier_ordering_best_first() {
        assert!(Tier::S < Tier::A);
        assert!(Tier::C < Tier::D);
    }

    #[test]
    fn test_slots_for_uncapped_tiers() {
        let slots = TierSlots { s: 1, a: 2, b: 3 };
        assert_eq!(slots.for_tier(Tier::A), Some(2));
        assert_eq!(slots.for_tier(Tier::C), None);
        assert_eq!(slots.for_tier(Tier::D), None);
    }

    #[test]
    fn test_report_occupancy_and_usage() {
        let report = TierReport {
            avg_points: 4,
            thresholds: TierThresholds::default(),
            tier_slots: TierSlots { s: 1, a: 1, b: 1 },
            tiered_players: vec![
                tiered("a", Some(Tier::S)),
                tiered("b", Some(Tier::C)),
                tiered("c", Some(Tier::C)),
            ],
        };

        assert_eq!(report.occupancy(Tier::C), 2);
        assert_eq!(report.occupancy(Tier::A), 0);
        assert_eq!(report.in_tier(Tier::S)[0].player.name, "a");

        let usage = report.slot_usage();
        assert_eq!(usage.len(), 5);
        assert_eq!(
            usage[0],
            SlotUsage {
                tier: Tier::S,
                occupied: 1,
                slots: Some(1)
            }
        );
        assert_eq!(usage[3].slots, None);
        assert!(report.find(&PlayerId::from("b")).is_some());
        assert!(report.find(&PlayerId::from("zzz")).is_none());
    }

    #[test]
    fn test_tiered_player_flattens_aggregate() {
        let json = serde_json::to_value(tiered("a", Some(Tier::B))).unwrap();
        assert_eq!(json["tier"], "B");
        assert_eq!(json["name"], "a");
        assert_eq!(json["total_tournaments"], 1);
    }
}
