//! Team endpoints

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::debug;

use super::{team_id, TeamIdPath};
use crate::api::middleware::{RequireAdmin, RequireViewer};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::{Team, TeamId, TeamPatch, TeamStats, TeamSummary};

/// Multipart field carrying the CSV upload
const IMPORT_FIELD: &str = "file";

/// Result of a CSV import
#[derive(Debug, Clone, Serialize)]
pub struct ImportTeamsResponse {
    pub created: usize,
}

/// Result of a team deletion
#[derive(Debug, Clone, Serialize)]
pub struct DeleteTeamResponse {
    pub deleted: bool,
    pub id: TeamId,
}

/// GET /teams
pub async fn list_teams(
    State(state): State<AppState>,
    RequireViewer(_): RequireViewer,
) -> Result<Json<Vec<TeamSummary>>, ApiError> {
    let teams = state.team_service.list_teams().await?;
    Ok(Json(teams))
}

/// GET /teams/stats
pub async fn get_team_stats(
    State(state): State<AppState>,
    RequireViewer(_): RequireViewer,
) -> Result<Json<Vec<TeamStats>>, ApiError> {
    let stats = state.team_service.get_team_stats().await?;
    Ok(Json(stats))
}

/// GET /teams/{id}
pub async fn get_team(
    State(state): State<AppState>,
    RequireViewer(_): RequireViewer,
    id: TeamIdPath,
) -> Result<Json<Team>, ApiError> {
    let team = state.team_service.get_team(team_id(id)?).await?;
    Ok(Json(team))
}

/// POST /teams/import
pub async fn import_teams(
    State(state): State<AppState>,
    RequireAdmin(caller): RequireAdmin,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ImportTeamsResponse>), ApiError> {
    let mut multipart = multipart
        .map_err(|e| ApiError::bad_request(format!("Expected a multipart upload: {}", e)))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(IMPORT_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read file '{}': {}", filename, e)))?;

        debug!(subject = %caller.subject, filename = %filename, size = bytes.len(), "Team import upload");

        let created = state.team_service.create_from_csv(&bytes, &filename).await?;
        return Ok((StatusCode::CREATED, Json(ImportTeamsResponse { created })));
    }

    Err(ApiError::bad_request(format!(
        "Missing multipart field '{}'",
        IMPORT_FIELD
    )))
}

/// PATCH /teams/{id}
pub async fn update_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    id: TeamIdPath,
    Json(patch): Json<TeamPatch>,
) -> Result<Json<Team>, ApiError> {
    let team = state.team_service.update_team(team_id(id)?, patch).await?;
    Ok(Json(team))
}

/// DELETE /teams/{id}
pub async fn delete_team(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    id: TeamIdPath,
) -> Result<Json<DeleteTeamResponse>, ApiError> {
    let id = team_id(id)?;
    state.team_service.delete_team(id).await?;

    Ok(Json(DeleteTeamResponse { deleted: true, id }))
}
