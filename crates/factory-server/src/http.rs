use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use factory_contract::{Agent, AgentPatch, CreateAgent};
use serde::Deserialize;

use crate::ids::generate_agent_id;
use crate::service::{ApiError, AppState};

/// Health endpoint path.
pub const HEALTH_PATH: &str = "/health";
/// Agent collection path (list, create).
pub const AGENTS_PATH: &str = "/agents";
/// Single-agent path (fetch, update, delete).
pub const AGENT_PATH: &str = "/agents/:id";

/// Build health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route(HEALTH_PATH, get(health))
}

/// Build agent resource routes.
pub fn agent_routes() -> Router<AppState> {
    Router::new()
        .route(AGENTS_PATH, get(list_agents).post(create_agent))
        .route(
            AGENT_PATH,
            get(get_agent).patch(update_agent).delete(delete_agent),
        )
}

/// Combined router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(agent_routes())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

#[derive(Debug, Deserialize)]
struct ListParams {
    /// Caller-asserted identity; a verified session should replace this.
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

async fn list_agents(
    State(st): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Agent>>, ApiError> {
    let Some(user_id) = params.user_id else {
        return Err(ApiError::Unauthorized);
    };
    st.store
        .list_for_user(&user_id)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn create_agent(
    State(st): State<AppState>,
    Json(body): Json<CreateAgent>,
) -> Result<impl IntoResponse, ApiError> {
    let new_agent = body.into_new_agent(generate_agent_id())?;
    let agent = st.store.create(new_agent).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

async fn get_agent(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Agent>, ApiError> {
    let Some(agent) = st.store.get(&id).await? else {
        return Err(ApiError::NotFound(id));
    };
    Ok(Json(agent))
}

async fn update_agent(
    State(st): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AgentPatch>,
) -> Result<Json<Agent>, ApiError> {
    patch.validate()?;
    st.store
        .update(&id, &patch)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

async fn delete_agent(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    st.store.delete(&id).await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
