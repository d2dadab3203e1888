use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use foxroute_core::projection::path_to_geojson;
use foxroute_core::{DisplayPoint, Error, GraphStore, NodeId};
use geojson::Feature;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// A point in display space as the map viewer sends it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for DisplayPoint {
    fn from(value: LatLng) -> Self {
        DisplayPoint::new(value.lat, value.lng)
    }
}

impl From<DisplayPoint> for LatLng {
    fn from(value: DisplayPoint) -> Self {
        Self {
            lat: value.lat(),
            lng: value.lng(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NearestResponse {
    pub id: String,
    /// Vector-space position `[x, y]` of the node
    pub point: [f64; 2],
    pub display: LatLng,
    pub distance: f64,
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub start: String,
    pub end: String,
    pub total_weight: f64,
    pub nodes: Vec<String>,
    pub path: Vec<LatLng>,
}

#[derive(Debug, Deserialize)]
pub struct DisplayRouteRequest {
    pub from: LatLng,
    pub to: LatLng,
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "loaded": state.store.is_loaded(),
    }))
}

pub async fn nearest(
    State(state): State<AppState>,
    Json(query): Json<LatLng>,
) -> Result<Json<NearestResponse>, ApiError> {
    let point = state.projector.to_vector_space(query.into());
    if !point.is_finite() {
        return Err(ApiError::bad_request("Coordinates must be finite"));
    }

    let projector = state.projector;
    let snapped = query_store(&state, move |store| store.find_nearest_node(point)).await?;

    Ok(Json(NearestResponse {
        id: snapped.id.to_string(),
        point: [snapped.point.x(), snapped.point.y()],
        display: projector.to_display_space(snapped.point).into(),
        distance: snapped.distance,
    }))
}

pub async fn route(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> Result<Json<RouteResponse>, ApiError> {
    let start = parse_node_id(&request.start)?;
    let end = parse_node_id(&request.end)?;

    let projector = state.projector;
    let (path, line) = query_store(&state, move |store| {
        let path = store.compute_path(start, end)?;
        let line = store.project_for_display(&path, &projector);
        Ok((path, line))
    })
    .await?;

    Ok(Json(RouteResponse {
        start: path.start().to_string(),
        end: path.end().to_string(),
        total_weight: path.total_weight(),
        nodes: path.nodes().iter().map(ToString::to_string).collect(),
        path: line.into_iter().map(LatLng::from).collect(),
    }))
}

pub async fn route_display(
    State(state): State<AppState>,
    Json(request): Json<DisplayRouteRequest>,
) -> Result<Json<Feature>, ApiError> {
    let from = DisplayPoint::from(request.from);
    let to = DisplayPoint::from(request.to);
    if !(from.geometry().x().is_finite()
        && from.geometry().y().is_finite()
        && to.geometry().x().is_finite()
        && to.geometry().y().is_finite())
    {
        return Err(ApiError::bad_request("Coordinates must be finite"));
    }

    let projector = state.projector;
    let feature = query_store(&state, move |store| {
        let path = store.route_between_display(from, to, &projector)?;
        path_to_geojson(&path, &projector)
    })
    .await?;

    Ok(Json(feature))
}

fn parse_node_id(text: &str) -> Result<NodeId, ApiError> {
    text.parse()
        .map_err(|err: Error| ApiError::bad_request(format!("Invalid node id {text:?}: {err}")))
}

/// Runs a graph query on the blocking pool; the first query may read the
/// adjacency document from disk.
async fn query_store<T, F>(state: &AppState, query: F) -> Result<T, ApiError>
where
    F: FnOnce(&GraphStore) -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || query(&store))
        .await
        .map_err(|err| ApiError::internal(format!("Query task failed: {err}")))?
        .map_err(ApiError::from)
}
