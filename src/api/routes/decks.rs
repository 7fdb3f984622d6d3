use axum::extract::{Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{resolve_scope, ApiError, ScopeParams};
use crate::models::{DeckUsage, Scope};
use crate::storage::Snapshot;

#[derive(Debug, Serialize)]
pub struct DeckListResponse {
    pub scope: Scope,
    pub decks: Vec<DeckUsage>,
}

pub async fn list_decks(
    State(state): State<AppState>,
    Query(params): Query<ScopeParams>,
) -> Result<Json<DeckListResponse>, ApiError> {
    let scope = resolve_scope(params.scope.as_deref(), state.default_scope)?;
    let decks = Snapshot::load(&state.storage)?.deck_usage(scope);

    Ok(Json(DeckListResponse { scope, decks }))
}
