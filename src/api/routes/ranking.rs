use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{resolve_scope, ApiError, ScopeParams};
use crate::models::{Scope, SlotUsage, TierSlots, TierThresholds, TieredPlayer};
use crate::storage::Snapshot;

#[derive(Debug, Serialize)]
pub struct RankingResponse {
    pub scope: Scope,
    pub avg_points: u32,
    pub thresholds: TierThresholds,
    pub tier_slots: TierSlots,
    pub slot_usage: Vec<SlotUsage>,
    pub players: Vec<TieredPlayer>,
}

pub async fn get_ranking(
    State(state): State<AppState>,
    Query(params): Query<ScopeParams>,
) -> Result<Json<RankingResponse>, ApiError> {
    let scope = resolve_scope(params.scope.as_deref(), state.default_scope)?;
    let snapshot = Snapshot::load(&state.storage)?;
    let report = snapshot.ranking(scope);

    tracing::debug!(%scope, players = report.tiered_players.len(), "Computed ranking");

    Ok(Json(RankingResponse {
        scope,
        avg_points: report.avg_points,
        thresholds: report.thresholds,
        tier_slots: report.tier_slots,
        slot_usage: report.slot_usage(),
        players: report.tiered_players,
    }))
}
