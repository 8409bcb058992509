//! Estate API endpoints.
//!
//! Estates, the trees planted on them, height statistics and the drone
//! survey plan.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::state::{AppState, PlantTreeOutcome};
use survey_core::{
    CreateEstateRequest, CreateResponse, CreateTreeRequest, DronePlanQuery, DronePlanResponse,
    Estate, EstateStats,
};

/// Create a new estate.
/// POST /estate
pub async fn create_estate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateEstateRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let Json(req) = body.map_err(|_| ApiError::InvalidBody)?;
    let (length, width) = state.rules().validate_estate(req.length, req.width)?;

    let estate = state.create_estate(length, width).await?;
    tracing::info!("Created estate {} ({}x{})", estate.id, length, width);

    Ok((StatusCode::CREATED, Json(CreateResponse { id: estate.id })))
}

/// Plant a tree within an estate.
/// POST /estate/:id/tree
pub async fn create_tree(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<CreateTreeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateResponse>), ApiError> {
    let id = canonical_estate_id(&id)?;
    let Json(req) = body.map_err(|_| ApiError::InvalidBody)?;
    state.rules().validate_tree_fields(req.x, req.y, req.height)?;

    let estate = find_estate(&state, &id).await?;
    let (x, y, height) = state.rules().validate_tree(&estate, req.x, req.y, req.height)?;

    match state.plant_tree(&estate, x, y, height).await? {
        PlantTreeOutcome::Planted(tree) => {
            tracing::info!("Planted tree {} at ({}, {}) in estate {}", tree.id, x, y, estate.id);
            Ok((StatusCode::CREATED, Json(CreateResponse { id: tree.id })))
        }
        PlantTreeOutcome::Occupied => Err(ApiError::TreeExists),
    }
}

/// Tree height statistics for an estate.
/// GET /estate/:id/stats
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<EstateStats>, ApiError> {
    let id = canonical_estate_id(&id)?;
    let estate = find_estate(&state, &id).await?;

    let stats = state.estate_stats(&estate.id).await?;
    Ok(Json(stats))
}

/// Drone survey distance, plus the rest point when a budget is given.
/// GET /estate/:id/drone-plan?max_distance=N
pub async fn get_drone_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<DronePlanQuery>, QueryRejection>,
) -> Result<Json<DronePlanResponse>, ApiError> {
    let id = canonical_estate_id(&id)?;
    let Query(query) = query.map_err(|_| ApiError::InvalidQuery)?;
    let estate = find_estate(&state, &id).await?;

    let plan = state.drone_plan(&estate, query.max_distance).await?;
    tracing::debug!(
        "Drone plan for estate {}: distance={} rest={:?}",
        estate.id,
        plan.total_distance,
        plan.return_point
    );

    Ok(Json(plan.into()))
}

/// Parse any accepted UUID spelling into the lowercase hyphenated form
/// estates are stored under.
fn canonical_estate_id(id: &str) -> Result<String, ApiError> {
    Uuid::parse_str(id)
        .map(|uuid| uuid.hyphenated().to_string())
        .map_err(|_| ApiError::InvalidEstateId)
}

async fn find_estate(state: &AppState, id: &str) -> Result<Estate, ApiError> {
    state.get_estate(id).await?.ok_or(ApiError::EstateNotFound)
}
