use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{resolve_scope, ApiError, ScopeParams};
use crate::models::{PenaltyStanding, Scope};
use crate::storage::Snapshot;

#[derive(Debug, Serialize)]
pub struct PenaltyListResponse {
    pub scope: Scope,
    pub total_penalties: u32,
    pub standings: Vec<PenaltyStanding>,
}

pub async fn list_penalties(
    State(state): State<AppState>,
    Query(params): Query<ScopeParams>,
) -> Result<Json<PenaltyListResponse>, ApiError> {
    let scope = resolve_scope(params.scope.as_deref(), state.default_scope)?;
    let standings = Snapshot::load(&state.storage)?.penalty_standings(scope);

    Ok(Json(PenaltyListResponse {
        scope,
        total_penalties: standings.iter().map(|s| s.total_penalties).sum(),
        standings,
    }))
}
