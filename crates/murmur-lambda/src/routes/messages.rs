use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use murmur_auth::identity::Identity;
use murmur_core::models::message::{MessagePart, Metadata};
use murmur_store::legacy;
use murmur_store::messages::{self, RecentMessages};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListParams {
    limit: Option<f64>,
}

pub async fn list_messages(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<ListParams>,
) -> Result<Json<RecentMessages>, ApiError> {
    let recent =
        messages::list_recent(&state.db, &state.table, &identity, params.limit).await?;
    Ok(Json(recent))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMessageBody {
    parts: Vec<MessagePart>,
    /// Client-side id of the message, echoed back into the stored row.
    message_id: String,
    #[serde(default)]
    metadata: Option<Metadata>,
}

#[derive(Serialize)]
pub struct AddedMessage {
    id: Uuid,
}

pub async fn add_user_message(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<AddMessageBody>,
) -> Result<Json<AddedMessage>, ApiError> {
    let id = messages::add_user_message(
        &state.db,
        &state.table,
        &identity,
        body.parts,
        body.message_id,
        body.metadata,
    )
    .await?;
    Ok(Json(AddedMessage { id }))
}

#[derive(Serialize)]
pub struct Cleared {
    deleted: usize,
}

pub async fn clear_messages(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Cleared>, ApiError> {
    let deleted = messages::clear_messages(&state.db, &state.table, &identity).await?;
    Ok(Json(Cleared { deleted }))
}

#[derive(Serialize)]
pub struct MessageCount {
    count: usize,
}

pub async fn messages_count(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<MessageCount>, ApiError> {
    let count = messages::count_messages(&state.db, &state.table, &identity).await?;
    Ok(Json(MessageCount { count }))
}

/// Retired write path that accepted arbitrary roles. Always 410.
pub async fn add_message_legacy() -> Result<Json<()>, ApiError> {
    legacy::add_message()?;
    Ok(Json(()))
}
