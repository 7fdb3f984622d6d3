use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{resolve_scope, ApiError, Pagination, PaginationMeta, ScopeParams};
use crate::calculate::aggregate;
use crate::models::{
    PenaltyRecord, PlayerAggregate, PlayerId, Scope, Tier, TieredPlayer, TournamentKind,
};
use crate::storage::Snapshot;

#[derive(Debug, Deserialize)]
pub struct ListPlayersParams {
    pub scope: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PlayerListResponse {
    pub scope: Scope,
    pub players: Vec<TieredPlayer>,
    pub pagination: PaginationMeta,
}

/// Ranked players with at least one tournament in scope.
pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<ListPlayersParams>,
) -> Result<Json<PlayerListResponse>, ApiError> {
    let scope = resolve_scope(params.scope.as_deref(), state.default_scope)?;
    let report = Snapshot::load(&state.storage)?.ranking(scope);

    let (page, pagination) =
        Pagination::new(params.page, params.page_size).paginate(report.tiered_players);

    Ok(Json(PlayerListResponse {
        scope,
        players: page,
        pagination,
    }))
}

#[derive(Debug, Serialize)]
pub struct PlayerResult {
    pub tournament_id: String,
    pub tournament_name: String,
    pub date: NaiveDate,
    pub kind: TournamentKind,
    pub placement: Option<i32>,
    pub deck: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerDetailResponse {
    pub scope: Scope,

    /// Position in the ranking; absent when the player has no tournaments in scope
    pub rank: Option<u32>,
    pub tier: Option<Tier>,
    pub percentile: Option<f64>,
    pub stats: PlayerAggregate,
    pub results: Vec<PlayerResult>,
    pub penalties: Vec<PenaltyRecord>,
}

pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ScopeParams>,
) -> Result<Json<PlayerDetailResponse>, ApiError> {
    let scope = resolve_scope(params.scope.as_deref(), state.default_scope)?;
    let snapshot = Snapshot::load(&state.storage)?;
    let player_id = PlayerId::from(id);

    let records = snapshot
        .scoped_records(scope)
        .into_iter()
        .find(|r| r.player.id == player_id)
        .ok_or_else(|| ApiError::NotFound(format!("Player {}", player_id)))?;

    let report = snapshot.ranking(scope);
    let ranked = report.find(&player_id);

    let mut results: Vec<PlayerResult> = records
        .placements
        .iter()
        .filter_map(|p| {
            let t = snapshot.tournament(&p.tournament_id)?;
            Some(PlayerResult {
                tournament_id: t.id.to_string(),
                tournament_name: t.name.clone(),
                date: t.date,
                kind: t.kind,
                placement: p.placement,
                deck: p.deck.clone(),
            })
        })
        .collect();
    results.sort_by(|a, b| b.date.cmp(&a.date));

    Ok(Json(PlayerDetailResponse {
        scope,
        rank: ranked.map(|r| r.rank),
        tier: ranked.and_then(|r| r.tier),
        percentile: ranked.map(|r| r.percentile),
        stats: aggregate(&records.player, &records.placements, &records.penalties),
        results,
        penalties: records.penalties,
    }))
}
