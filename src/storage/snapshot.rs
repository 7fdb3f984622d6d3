//! In-memory snapshot of all stored records.
//!
//! A snapshot is loaded once per request or command and then scoped and
//! aggregated. Nothing computed from it is written back.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::{EntityType, JsonlReader, StorageConfig, StorageError};
use crate::calculate::{aggregate, classify, deck_usage, rank_penalties, rank_players};
use crate::models::{
    DeckUsage, PenaltyRecord, PenaltyStanding, PlacementRecord, Player, PlayerAggregate,
    PlayerId, Scope, TierReport, Tournament, TournamentId,
};

/// Remove duplicate records, keeping the last version of each id at the
/// position where the id first appeared.
pub fn dedup_by_id<T, F>(items: Vec<T>, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<T> = Vec::with_capacity(items.len());

    for item in items {
        let id = key(&item).to_string();
        match index.get(&id) {
            Some(&pos) => out[pos] = item,
            None => {
                index.insert(id, out.len());
                out.push(item);
            }
        }
    }

    out
}

/// One player's records within a scope.
#[derive(Debug, Clone)]
pub struct PlayerRecords {
    pub player: Player,
    pub placements: Vec<PlacementRecord>,
    pub penalties: Vec<PenaltyRecord>,
}

/// All stored records at one point in time.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub tournaments: Vec<Tournament>,
    pub placements: Vec<PlacementRecord>,
    pub penalties: Vec<PenaltyRecord>,
}

impl Snapshot {
    pub fn load(config: &StorageConfig) -> Result<Self, StorageError> {
        let players = JsonlReader::<Player>::for_entity(config, EntityType::Player).read_all()?;
        let tournaments =
            JsonlReader::<Tournament>::for_entity(config, EntityType::Tournament).read_all()?;
        let placements =
            JsonlReader::<PlacementRecord>::for_entity(config, EntityType::Placement).read_all()?;
        let penalties =
            JsonlReader::<PenaltyRecord>::for_entity(config, EntityType::Penalty).read_all()?;

        let snapshot = Self {
            players: dedup_by_id(players, |p| p.id.as_str()),
            tournaments: dedup_by_id(tournaments, |t| t.id.as_str()),
            placements: dedup_by_id(placements, |p| p.id.as_str()),
            penalties: dedup_by_id(penalties, |p| p.id.as_str()),
        };

        debug!(
            players = snapshot.players.len(),
            tournaments = snapshot.tournaments.len(),
            placements = snapshot.placements.len(),
            penalties = snapshot.penalties.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn tournament(&self, id: &TournamentId) -> Option<&Tournament> {
        self.tournaments.iter().find(|t| &t.id == id)
    }

    /// Roster sorted by name (case-insensitive), then id.
    pub fn players_alphabetical(&self) -> Vec<&Player> {
        let mut players: Vec<&Player> = self.players.iter().collect();
        players.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then_with(|| a.id.cmp(&b.id)));
        players
    }

    /// Tournaments in scope, newest first.
    pub fn tournaments_in_scope(&self, scope: Scope) -> Vec<&Tournament> {
        let mut tournaments: Vec<&Tournament> = self
            .tournaments
            .iter()
            .filter(|t| scope.includes_tournament(t.kind))
            .collect();
        tournaments.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.name.cmp(&b.name)));
        tournaments
    }

    /// Number of results recorded for a tournament.
    pub fn entrant_count(&self, tournament_id: &TournamentId) -> usize {
        self.placements
            .iter()
            .filter(|p| &p.tournament_id == tournament_id)
            .count()
    }

    /// Placement records whose tournament falls in scope. Results pointing at
    /// unknown tournaments are left out, since their pool cannot be told.
    pub fn placements_in_scope(&self, scope: Scope) -> Vec<&PlacementRecord> {
        let in_scope: HashSet<&TournamentId> = self
            .tournaments
            .iter()
            .filter(|t| scope.includes_tournament(t.kind))
            .map(|t| &t.id)
            .collect();

        self.placements
            .iter()
            .filter(|p| in_scope.contains(&p.tournament_id))
            .collect()
    }

    /// Every player's scoped records, in alphabetical roster order.
    pub fn scoped_records(&self, scope: Scope) -> Vec<PlayerRecords> {
        let mut placements: HashMap<&PlayerId, Vec<PlacementRecord>> = HashMap::new();
        for record in self.placements_in_scope(scope) {
            placements
                .entry(&record.player_id)
                .or_default()
                .push(record.clone());
        }

        let mut penalties: HashMap<&PlayerId, Vec<PenaltyRecord>> = HashMap::new();
        for record in self
            .penalties
            .iter()
            .filter(|p| scope.includes_penalty(p.penalty_type))
        {
            penalties
                .entry(&record.player_id)
                .or_default()
                .push(record.clone());
        }

        self.players_alphabetical()
            .into_iter()
            .map(|player| PlayerRecords {
                player: player.clone(),
                placements: placements.remove(&player.id).unwrap_or_default(),
                penalties: penalties.remove(&player.id).unwrap_or_default(),
            })
            .collect()
    }

    /// Aggregates for every player in alphabetical order.
    pub fn aggregates(&self, scope: Scope) -> Vec<PlayerAggregate> {
        self.scoped_records(scope)
            .iter()
            .map(|r| aggregate(&r.player, &r.placements, &r.penalties))
            .collect()
    }

    /// Ranked and tiered field for a scope.
    pub fn ranking(&self, scope: Scope) -> TierReport {
        classify(&rank_players(self.aggregates(scope)))
    }

    pub fn penalty_standings(&self, scope: Scope) -> Vec<PenaltyStanding> {
        rank_penalties(&self.aggregates(scope))
    }

    pub fn deck_usage(&self, scope: Scope) -> Vec<DeckUsage> {
        let placements: Vec<PlacementRecord> = self
            .placements_in_scope(scope)
            .into_iter()
            .cloned()
            .collect();
        deck_usage(&placements)
    }
}
