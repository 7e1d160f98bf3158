//! Player endpoints

use axum::extract::{rejection::QueryRejection, Query, State};

use super::{team_id, TeamIdPath};
use crate::api::middleware::RequireViewer;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Player, PlayerQuery};

fn player_query(query: Result<Query<PlayerQuery>, QueryRejection>) -> Result<PlayerQuery, ApiError> {
    query
        .map(|Query(query)| query)
        .map_err(|e| ApiError::bad_request(format!("Invalid query parameters: {}", e)))
}

/// GET /players
pub async fn list_players(
    State(state): State<AppState>,
    RequireViewer(_): RequireViewer,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let query = player_query(query)?;
    let players = state.team_service.list_players(&query).await?;

    Ok(Json(players))
}

/// GET /teams/{id}/players
pub async fn list_team_players(
    State(state): State<AppState>,
    RequireViewer(_): RequireViewer,
    id: TeamIdPath,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<Json<Vec<Player>>, ApiError> {
    let query = player_query(query)?;
    let players = state
        .team_service
        .list_players_by_team(team_id(id)?, &query)
        .await?;

    Ok(Json(players))
}
