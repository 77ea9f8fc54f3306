//! Message store operations, all scoped to an explicit caller identity.

use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, Select, WriteRequest};
use aws_sdk_dynamodb::Client;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use murmur_auth::identity::Identity;
use murmur_core::models::message::{Message, MessagePart, MessageRole, Metadata};

use crate::error::StoreError;
use crate::item::{self, ATTR_SORT_KEY, ATTR_USER_ID};

/// Default page size for [`list_recent`] when the caller passes no limit.
pub const DEFAULT_LIMIT: usize = 50;
/// Hard ceiling on a single page, and on one sweep batch in
/// [`clear_messages`].
pub const MAX_LIMIT: usize = 200;

/// DynamoDB caps one BatchWriteItem call at 25 requests.
const BATCH_WRITE_CHUNK: usize = 25;

/// Result of [`list_recent`].
#[derive(Debug, Serialize)]
pub struct RecentMessages {
    /// Display name of the viewer, when the identity provider knows one.
    pub viewer: Option<String>,
    /// In chronological (ascending creation) order.
    pub messages: Vec<Message>,
}

/// Effective page size for a recent-messages query:
/// `clamp(floor(limit), 1, 200)`, defaulting to 50 when absent. A
/// non-numeric limit (NaN) clamps to 1.
pub fn effective_limit(limit: Option<f64>) -> usize {
    let n = limit.unwrap_or(DEFAULT_LIMIT as f64).floor();
    if !(n >= 1.0) {
        1
    } else if n > MAX_LIMIT as f64 {
        MAX_LIMIT
    } else {
        n as usize
    }
}

/// List the caller's most recent messages, in chronological order.
///
/// The query reads newest-first (descending sort key) to take the page,
/// then reverses, so the caller always sees ascending creation order.
pub async fn list_recent(
    client: &Client,
    table: &str,
    identity: &Identity,
    limit: Option<f64>,
) -> Result<RecentMessages, StoreError> {
    let page = effective_limit(limit);

    let resp = client
        .query()
        .table_name(table)
        .key_condition_expression("#uid = :u")
        .expression_attribute_names("#uid", ATTR_USER_ID)
        .expression_attribute_values(":u", AttributeValue::S(identity.subject.clone()))
        .scan_index_forward(false)
        .limit(page as i32)
        .send()
        .await
        .map_err(|e| StoreError::Query(e.into_service_error().to_string()))?;

    let mut messages = resp
        .items()
        .iter()
        .map(item::from_item)
        .collect::<Result<Vec<_>, _>>()?;
    messages.reverse();

    Ok(RecentMessages {
        viewer: identity.name.clone(),
        messages,
    })
}

/// Store a message sent by the end user.
///
/// The role is forced to `user` no matter what the request carried, and
/// the row is owned by the caller's subject. Returns the store-assigned
/// id.
pub async fn add_user_message(
    client: &Client,
    table: &str,
    identity: &Identity,
    parts: Vec<MessagePart>,
    client_id: String,
    metadata: Option<Metadata>,
) -> Result<Uuid, StoreError> {
    let message = Message {
        id: Uuid::new_v4(),
        user_id: identity.subject.clone(),
        role: MessageRole::User,
        parts,
        client_id: Some(client_id),
        metadata,
        created_at: jiff::Timestamp::now(),
    };

    insert_message(client, table, &message).await?;

    info!(id = %message.id, "added user message");
    Ok(message.id)
}

/// Guard for the server-attributed write paths: the `user` role is
/// reserved for [`add_user_message`], which forces it.
pub fn validate_server_role(role: MessageRole) -> Result<(), StoreError> {
    if role == MessageRole::User {
        return Err(StoreError::InvalidRole(
            "server-attributed messages cannot use the user role".to_string(),
        ));
    }
    Ok(())
}

/// Store a server-attributed message under an arbitrary subject.
///
/// Trusted path: no identity check. Must only be called from the
/// server's own completion-handling code, never wired to a route.
pub async fn add_assistant_message(
    client: &Client,
    table: &str,
    user_id: &str,
    role: MessageRole,
    parts: Vec<MessagePart>,
    metadata: Option<Metadata>,
) -> Result<Uuid, StoreError> {
    validate_server_role(role)?;

    let message = Message {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        role,
        parts,
        client_id: None,
        metadata,
        created_at: jiff::Timestamp::now(),
    };

    insert_message(client, table, &message).await?;

    info!(id = %message.id, role = role.as_str(), "added assistant message");
    Ok(message.id)
}

/// Identity-scoped variant of [`add_assistant_message`], for server
/// writes made on behalf of the original caller.
pub async fn add_assistant_message_public(
    client: &Client,
    table: &str,
    identity: &Identity,
    role: MessageRole,
    parts: Vec<MessagePart>,
    metadata: Option<Metadata>,
) -> Result<Uuid, StoreError> {
    add_assistant_message(client, table, &identity.subject, role, parts, metadata).await
}

/// Delete every message owned by the caller. Returns the number deleted.
///
/// Runs as a strictly sequential bounded-batch sweep: fetch up to
/// [`MAX_LIMIT`] keys, delete them, fetch again, until a fetch comes back
/// empty. Rows a batch write leaves unprocessed are not counted; the next
/// fetch picks them up again, so the sweep still terminates with an
/// accurate total.
pub async fn clear_messages(
    client: &Client,
    table: &str,
    identity: &Identity,
) -> Result<usize, StoreError> {
    let mut deleted = 0usize;

    loop {
        let resp = client
            .query()
            .table_name(table)
            .key_condition_expression("#uid = :u")
            .expression_attribute_names("#uid", ATTR_USER_ID)
            .expression_attribute_values(":u", AttributeValue::S(identity.subject.clone()))
            .projection_expression("#uid, sk")
            .limit(MAX_LIMIT as i32)
            .send()
            .await
            .map_err(|e| StoreError::Query(e.into_service_error().to_string()))?;

        let items = resp.items();
        if items.is_empty() {
            break;
        }

        for chunk in items.chunks(BATCH_WRITE_CHUNK) {
            let mut requests = Vec::with_capacity(chunk.len());
            for key in chunk {
                let sk = key
                    .get(ATTR_SORT_KEY)
                    .cloned()
                    .ok_or_else(|| StoreError::Malformed("item without sort key".to_string()))?;
                let delete = DeleteRequest::builder()
                    .key(ATTR_USER_ID, AttributeValue::S(identity.subject.clone()))
                    .key(ATTR_SORT_KEY, sk)
                    .build()
                    .map_err(|e| StoreError::Delete(e.to_string()))?;
                requests.push(WriteRequest::builder().delete_request(delete).build());
            }

            let write = client
                .batch_write_item()
                .request_items(table, requests)
                .send()
                .await
                .map_err(|e| StoreError::Delete(e.into_service_error().to_string()))?;

            let unprocessed = write
                .unprocessed_items()
                .and_then(|m| m.get(table))
                .map(Vec::len)
                .unwrap_or(0);
            deleted += chunk.len() - unprocessed;
        }
    }

    info!(
        deleted,
        subject = %identity.subject,
        "cleared messages"
    );
    Ok(deleted)
}

/// Count the caller's messages.
///
/// Walks the whole partition with COUNT queries, so cost grows with
/// history size. Fine at small scale; past that the right design is a
/// denormalized per-user counter updated transactionally alongside
/// insert and delete.
pub async fn count_messages(
    client: &Client,
    table: &str,
    identity: &Identity,
) -> Result<usize, StoreError> {
    let mut count = 0usize;
    let mut start_key = None;

    loop {
        let resp = client
            .query()
            .table_name(table)
            .key_condition_expression("#uid = :u")
            .expression_attribute_names("#uid", ATTR_USER_ID)
            .expression_attribute_values(":u", AttributeValue::S(identity.subject.clone()))
            .select(Select::Count)
            .set_exclusive_start_key(start_key)
            .send()
            .await
            .map_err(|e| StoreError::Query(e.into_service_error().to_string()))?;

        count += resp.count() as usize;

        match resp.last_evaluated_key() {
            Some(key) => start_key = Some(key.clone()),
            None => break,
        }
    }

    Ok(count)
}

async fn insert_message(
    client: &Client,
    table: &str,
    message: &Message,
) -> Result<(), StoreError> {
    let item = item::to_item(message)?;

    client
        .put_item()
        .table_name(table)
        .set_item(Some(item))
        .send()
        .await
        .map_err(|e| StoreError::PutItem(e.into_service_error().to_string()))?;

    Ok(())
}
