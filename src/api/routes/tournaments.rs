use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{resolve_scope, ApiError, Pagination, PaginationMeta};
use crate::models::{Scope, TournamentKind};
use crate::storage::Snapshot;

#[derive(Debug, Deserialize)]
pub struct ListTournamentsParams {
    pub scope: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct TournamentSummary {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub kind: TournamentKind,
    pub entrants: u32,
    pub winner: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TournamentListResponse {
    pub scope: Scope,
    pub tournaments: Vec<TournamentSummary>,
    pub pagination: PaginationMeta,
}

pub async fn list_tournaments(
    State(state): State<AppState>,
    Query(params): Query<ListTournamentsParams>,
) -> Result<Json<TournamentListResponse>, ApiError> {
    let scope = resolve_scope(params.scope.as_deref(), state.default_scope)?;
    let snapshot = Snapshot::load(&state.storage)?;

    let summaries: Vec<TournamentSummary> = snapshot
        .tournaments_in_scope(scope)
        .into_iter()
        .map(|t| {
            let winner = snapshot
                .placements
                .iter()
                .find(|p| p.tournament_id == t.id && p.is_winner())
                .and_then(|p| snapshot.player(&p.player_id))
                .map(|p| p.name.clone());

            TournamentSummary {
                id: t.id.to_string(),
                name: t.name.clone(),
                date: t.date,
                kind: t.kind,
                entrants: snapshot.entrant_count(&t.id) as u32,
                winner,
            }
        })
        .collect();

    let (page, pagination) = Pagination::new(params.page, params.page_size).paginate(summaries);

    Ok(Json(TournamentListResponse {
        scope,
        tournaments: page,
        pagination,
    }))
}
