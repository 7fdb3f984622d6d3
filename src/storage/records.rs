//! Administrative record entry.
//!
//! Writes are appends; a record saved again under the same id replaces the
//! earlier line when the snapshot is loaded. Removals rewrite the file.

use tracing::info;

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::models::{
    PenaltyId, PenaltyRecord, PlacementId, PlacementRecord, Player, PlayerId, Tournament,
    TournamentId,
};

fn ensure_player(config: &StorageConfig, id: &PlayerId) -> Result<(), StorageError> {
    let found = JsonlReader::<Player>::for_entity(config, EntityType::Player)
        .read_where(|p| &p.id == id)?;
    if found.is_empty() {
        return Err(StorageError::UnknownRecord {
            entity: "player",
            id: id.to_string(),
        });
    }
    Ok(())
}

fn ensure_tournament(config: &StorageConfig, id: &TournamentId) -> Result<(), StorageError> {
    let found = JsonlReader::<Tournament>::for_entity(config, EntityType::Tournament)
        .read_where(|t| &t.id == id)?;
    if found.is_empty() {
        return Err(StorageError::UnknownRecord {
            entity: "tournament",
            id: id.to_string(),
        });
    }
    Ok(())
}

pub fn save_player(config: &StorageConfig, player: Player) -> Result<Player, StorageError> {
    JsonlWriter::for_entity(config, EntityType::Player).append(&player)?;
    info!(id = %player.id, name = %player.name, "Saved player");
    Ok(player)
}

/// Save a tournament. Saving again under the same name and date updates it,
/// but the pool it belongs to cannot change once results hang off it.
pub fn save_tournament(
    config: &StorageConfig,
    tournament: Tournament,
) -> Result<Tournament, StorageError> {
    let existing = JsonlReader::<Tournament>::for_entity(config, EntityType::Tournament)
        .read_where(|t| t.id == tournament.id)?;
    if let Some(previous) = existing.last() {
        if previous.kind != tournament.kind {
            return Err(StorageError::KindConflict {
                id: tournament.id.to_string(),
                existing: previous.kind,
                requested: tournament.kind,
            });
        }
    }

    JsonlWriter::for_entity(config, EntityType::Tournament).append(&tournament)?;
    info!(id = %tournament.id, name = %tournament.name, kind = %tournament.kind, "Saved tournament");
    Ok(tournament)
}

/// Record a player's result. Both the player and the tournament must exist.
pub fn record_result(
    config: &StorageConfig,
    record: PlacementRecord,
) -> Result<PlacementRecord, StorageError> {
    ensure_player(config, &record.player_id)?;
    ensure_tournament(config, &record.tournament_id)?;

    JsonlWriter::for_entity(config, EntityType::Placement).append(&record)?;
    info!(
        tournament = %record.tournament_id,
        player = %record.player_id,
        placement = ?record.placement,
        "Recorded result"
    );
    Ok(record)
}

/// Record a double-loss penalty against an existing player.
pub fn save_penalty(
    config: &StorageConfig,
    penalty: PenaltyRecord,
) -> Result<PenaltyRecord, StorageError> {
    ensure_player(config, &penalty.player_id)?;

    JsonlWriter::for_entity(config, EntityType::Penalty).append(&penalty)?;
    info!(id = %penalty.id, player = %penalty.player_id, kind = %penalty.penalty_type, "Saved penalty");
    Ok(penalty)
}

/// Delete a penalty. Returns whether anything was removed.
pub fn remove_penalty(config: &StorageConfig, id: &PenaltyId) -> Result<bool, StorageError> {
    let removed = JsonlWriter::<PenaltyRecord>::for_entity(config, EntityType::Penalty)
        .remove_id(id.as_str())?;
    if removed > 0 {
        info!(%id, "Removed penalty");
    }
    Ok(removed > 0)
}

/// Delete a tournament result, including any superseded versions of it.
pub fn remove_placement(config: &StorageConfig, id: &PlacementId) -> Result<bool, StorageError> {
    let removed = JsonlWriter::<PlacementRecord>::for_entity(config, EntityType::Placement)
        .remove_id(id.as_str())?;
    if removed > 0 {
        info!(%id, versions = removed, "Removed result");
    }
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityId, PenaltyType, Scope, TournamentKind};
    use crate::storage::Snapshot;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn setup() -> (TempDir, StorageConfig, Player, Tournament) {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        let player = save_player(&config, Player::new("Rex Raptor").unwrap()).unwrap();
        let tournament = save_tournament(
            &config,
            Tournament::new(
                "Duelist Kingdom".to_string(),
                NaiveDate::from_ymd_opt(2024, 7, 7).unwrap(),
                TournamentKind::Veteran,
            ),
        )
        .unwrap();
        (temp_dir, config, player, tournament)
    }

    #[test]
    fn test_record_result_requires_known_ids() {
        let (_dir, config, player, tournament) = setup();

        let unknown_player = PlacementRecord::new(tournament.id.clone(), EntityId::from("nobody"));
        assert!(matches!(
            record_result(&config, unknown_player),
            Err(StorageError::UnknownRecord { entity: "player", .. })
        ));

        let unknown_event = PlacementRecord::new(EntityId::from("nowhere"), player.id.clone());
        assert!(matches!(
            record_result(&config, unknown_event),
            Err(StorageError::UnknownRecord { entity: "tournament", .. })
        ));

        let ok = PlacementRecord::new(tournament.id, player.id).with_placement(2);
        assert!(record_result(&config, ok).is_ok());
    }

    #[test]
    fn test_rerecording_replaces_result() {
        let (_dir, config, player, tournament) = setup();

        let first = PlacementRecord::new(tournament.id.clone(), player.id.clone()).with_placement(4);
        record_result(&config, first).unwrap();
        let fixed = PlacementRecord::new(tournament.id.clone(), player.id.clone()).with_placement(1);
        record_result(&config, fixed).unwrap();

        let snapshot = Snapshot::load(&config).unwrap();
        assert_eq!(snapshot.placements.len(), 1);

        let agg = &snapshot.aggregates(Scope::All)[0];
        assert_eq!(agg.first_place, 1);
        assert_eq!(agg.fourth_place, 0);
    }

    #[test]
    fn test_remove_penalty() {
        let (_dir, config, player, _) = setup();
        let penalty =
            save_penalty(&config, PenaltyRecord::new(player.id.clone(), PenaltyType::Regular))
                .unwrap();

        assert!(remove_penalty(&config, &penalty.id).unwrap());
        assert!(!remove_penalty(&config, &penalty.id).unwrap());
        assert!(Snapshot::load(&config).unwrap().penalties.is_empty());
    }

    #[test]
    fn test_remove_penalty_keeps_unreadable_lines() {
        let (_dir, config, player, _) = setup();
        let drop =
            save_penalty(&config, PenaltyRecord::new(player.id.clone(), PenaltyType::Regular))
                .unwrap();
        let keep =
            save_penalty(&config, PenaltyRecord::new(player.id.clone(), PenaltyType::Beginner))
                .unwrap();

        let path = config.entity_path(EntityType::Penalty);
        let legacy = format!(
            r#"{{"id":"old-card","player_id":"{}","penalty_type":"yellow"}}"#,
            player.id
        );
        let mut raw = std::fs::read_to_string(&path).unwrap();
        raw.push_str(&legacy);
        raw.push('\n');
        std::fs::write(&path, raw).unwrap();

        assert!(remove_penalty(&config, &drop.id).unwrap());

        let after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(after.lines().count(), 2);
        assert!(after.lines().any(|l| l == legacy));

        let penalties = Snapshot::load(&config).unwrap().penalties;
        assert_eq!(penalties.len(), 1);
        assert_eq!(penalties[0].id, keep.id);
    }

    #[test]
    fn test_remove_placement_drops_all_versions() {
        let (_dir, config, player, tournament) = setup();
        let first = PlacementRecord::new(tournament.id.clone(), player.id.clone()).with_placement(3);
        record_result(&config, first).unwrap();
        let fixed = PlacementRecord::new(tournament.id.clone(), player.id.clone()).with_placement(2);
        let fixed = record_result(&config, fixed).unwrap();

        assert!(remove_placement(&config, &fixed.id).unwrap());
        assert!(Snapshot::load(&config).unwrap().placements.is_empty());
    }

    #[test]
    fn test_tournament_kind_cannot_change() {
        let (_dir, config, _, tournament) = setup();

        let same_again =
            Tournament::new(tournament.name.clone(), tournament.date, TournamentKind::Veteran);
        assert!(save_tournament(&config, same_again).is_ok());

        let switched =
            Tournament::new(tournament.name.clone(), tournament.date, TournamentKind::Beginner);
        assert!(matches!(
            save_tournament(&config, switched),
            Err(StorageError::KindConflict {
                existing: TournamentKind::Veteran,
                requested: TournamentKind::Beginner,
                ..
            })
        ));

        let snapshot = Snapshot::load(&config).unwrap();
        assert_eq!(snapshot.tournaments.len(), 1);
        assert_eq!(snapshot.tournaments[0].kind, TournamentKind::Veteran);
    }

    #[test]
    fn test_penalty_requires_known_player() {
        let (_dir, config, _, _) = setup();
        let penalty = PenaltyRecord::new(EntityId::from("ghost"), PenaltyType::Beginner);
        assert!(save_penalty(&config, penalty).is_err());
    }

    #[test]
    fn test_remove_placement() {
        let (_dir, config, player, tournament) = setup();
        let record =
            record_result(&config, PlacementRecord::new(tournament.id, player.id)).unwrap();

        assert!(remove_placement(&config, &record.id).unwrap());
        assert!(!remove_placement(&config, &record.id).unwrap());
    }
}
