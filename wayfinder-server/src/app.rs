//! HTTP routes over a shared navigation graph

use std::sync::Arc;

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::{ServiceBuilder, timeout::error::Elapsed};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};
use wayfinder_core::prelude::*;

use crate::config::ListenConfig;
use crate::error::{ApiError, ApiResult, ErrorBody};

/// Read-only state shared by every request
pub struct AppState {
    pub graph: NavigationGraph,
    pub routing: RoutingConfig,
    pub limits: ListenConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(graph: NavigationGraph, routing: RoutingConfig, limits: ListenConfig) -> Self {
        Self {
            graph,
            routing,
            limits,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let timeout = state.limits.request_timeout();
    let max_concurrent = state.limits.max_concurrent_requests;

    Router::new()
        .route("/health", get(health))
        .route("/locations", get(list_locations))
        .route("/locations/{id}", get(get_location))
        .route("/locations/{id}/neighbors", get(get_neighbors))
        .route("/nearest", get(nearest))
        .route("/route", post(route))
        .route("/route/geojson", post(route_geojson))
        .route("/routes", post(routes))
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .concurrency_limit(max_concurrent)
                .timeout(timeout),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub locations: usize,
    pub connections: usize,
    pub floors: Vec<Floor>,
}

async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        locations: state.graph.location_count(),
        connections: state.graph.connection_count(),
        floors: state.graph.floors(),
    })
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

/// Points of interest, filtered by name when `search` is given
async fn list_locations(
    State(state): State<SharedState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Location>>> {
    let Query(params) = params?;
    let locations = match params.search.as_deref() {
        Some(term) => state.graph.search_pois(term),
        None => state.graph.locations().filter(|l| l.is_poi()).collect(),
    };
    Ok(Json(locations.into_iter().cloned().collect()))
}

async fn get_location(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Location>> {
    Ok(Json(state.graph.location(&id)?.clone()))
}

#[derive(Debug, Serialize)]
pub struct NeighborResponse {
    pub id: String,
    pub name: String,
    pub floor: Floor,
    pub connection: String,
}

async fn get_neighbors(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<NeighborResponse>>> {
    let neighbors = state
        .graph
        .neighbors(&id)?
        .into_iter()
        .map(|n| NeighborResponse {
            id: n.location.id.clone(),
            name: n.location.name.clone(),
            floor: n.location.floor,
            connection: n.connection.kind.to_string(),
        })
        .collect();
    Ok(Json(neighbors))
}

#[derive(Debug, Deserialize)]
pub struct NearestParams {
    pub floor: Floor,
    pub x: f64,
    pub y: f64,
}

async fn nearest(
    State(state): State<SharedState>,
    params: Result<Query<NearestParams>, QueryRejection>,
) -> ApiResult<Json<Location>> {
    let Query(NearestParams { floor, x, y }) = params?;
    state
        .graph
        .nearest_location(floor, x, y)
        .cloned()
        .map(Json)
        .ok_or(ApiError::EmptyFloor(floor))
}

async fn route(
    State(state): State<SharedState>,
    payload: Result<Json<RouteQuery>, JsonRejection>,
) -> ApiResult<Json<RouteResult>> {
    let Json(query) = payload?;
    let result = request_route(
        &state.graph,
        &query.start,
        &query.destination,
        query.mode,
        &state.routing,
    )?;
    Ok(Json(result))
}

async fn route_geojson(
    State(state): State<SharedState>,
    payload: Result<Json<RouteQuery>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(query) = payload?;
    let result = request_route(
        &state.graph,
        &query.start,
        &query.destination,
        query.mode,
        &state.routing,
    )?;
    let body = result.to_geojson_string()?;
    Ok(([(header::CONTENT_TYPE, "application/geo+json")], body).into_response())
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub queries: Vec<RouteQuery>,
}

/// Batch entry, either a route or the error it failed with
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Route(Box<RouteResult>),
    Failed(ErrorBody),
}

async fn routes(
    State(state): State<SharedState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<BatchEntry>>> {
    let Json(BatchRequest { queries }) = payload?;
    if queries.len() > state.limits.max_batch_size {
        return Err(ApiError::BadRequest(format!(
            "batch of {} queries exceeds the limit of {}",
            queries.len(),
            state.limits.max_batch_size
        )));
    }

    info!("Routing batch of {} queries", queries.len());
    let worker_state = Arc::clone(&state);
    let results = tokio::task::spawn_blocking(move || {
        route_batch(&worker_state.graph, &queries, &worker_state.routing)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("batch worker failed: {e}")))?;

    let entries = results
        .into_iter()
        .map(|result| match result {
            Ok(route) => BatchEntry::Route(Box::new(route)),
            Err(e) => {
                debug!("Batch entry failed: {e}");
                BatchEntry::Failed(ApiError::from(e).body())
            }
        })
        .collect();
    Ok(Json(entries))
}
