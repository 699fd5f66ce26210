use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Path, Query, State},
    Json,
};
use common::types::StatusAck;
use serde::Deserialize;
use service::variables::{Props, UpdateOutcome, Variable, VariableParams};
use tracing::{debug, info, warn};

use crate::context::RequestContext;
use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub scope: Option<String>,
}

async fn read_body(state: &ServerState, body: Body) -> Result<Bytes, ApiError> {
    to_bytes(body, state.settings.max_body_bytes)
        .await
        .map_err(|e| ApiError::PayloadRead(e.to_string()))
}

/// List every stored variable in insertion order.
pub async fn list_variables(State(state): State<ServerState>) -> Json<Vec<Variable>> {
    let list = state.store.list().await;
    debug!(count = list.len(), "list variables");
    Json(list)
}

/// Create a variable from query parameters; the raw body becomes `props`.
///
/// Repeated keys never reject the request: the first value wins.
pub async fn create_variable(
    State(state): State<ServerState>,
    RequestContext(actor): RequestContext,
    Query(pairs): Query<Vec<(String, String)>>,
    body: Body,
) -> Result<Json<Variable>, ApiError> {
    let params = VariableParams::from_pairs(pairs);
    let bytes = read_body(&state, body).await?;
    let created = state.store.create(params, Props::from_bytes(&bytes), &actor).await;
    Ok(Json(created))
}

pub async fn get_variable(
    State(state): State<ServerState>,
    Path(uid): Path<String>,
) -> Result<Json<Variable>, ApiError> {
    state
        .store
        .get(&uid)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("variable {uid}")))
}

/// Merge a JSON body onto the matching variable.
///
/// Always acknowledges with `{"status":"updated","uid":..}`: a missing record or an
/// undecodable body is logged, not reported.
pub async fn update_variable(
    State(state): State<ServerState>,
    RequestContext(actor): RequestContext,
    Path(uid): Path<String>,
    body: Body,
) -> Json<StatusAck> {
    let payload = match read_body(&state, body).await {
        Ok(b) => b,
        Err(e) => {
            warn!(%uid, error = %e, "update body unreadable; treating as empty payload");
            Bytes::new()
        }
    };
    let outcome = state.store.update(&uid, &payload, &actor).await;
    match &outcome {
        UpdateOutcome::Updated { records, .. } => info!(%uid, count = records.len(), "update applied"),
        UpdateOutcome::Undecodable { reason, .. } => warn!(%uid, %reason, "update ignored"),
        UpdateOutcome::NotFound { .. } => debug!(%uid, "update matched nothing"),
    }
    Json(StatusAck::updated(outcome.uid()))
}

/// Remove every variable matching `uid`; succeeds whether or not anything matched.
pub async fn delete_variable(
    State(state): State<ServerState>,
    Path(uid): Path<String>,
) -> Json<StatusAck> {
    let outcome = state.store.delete(&uid).await;
    Json(StatusAck::deleted(outcome.uid))
}

/// Bulk create from a `KEY=VALUE` per line body.
pub async fn import_variables(
    State(state): State<ServerState>,
    RequestContext(actor): RequestContext,
    Query(q): Query<ImportQuery>,
    body: Body,
) -> Result<Json<Vec<Variable>>, ApiError> {
    let bytes = read_body(&state, body).await?;
    let text = String::from_utf8_lossy(&bytes);
    let created = state.store.import(&text, q.scope, &actor).await;
    Ok(Json(created))
}
