//! Marshalling between [`Message`] and the DynamoDB item shape.
//!
//! Attribute layout: `userId` (S, partition key), `sk` (S, sort key —
//! zero-padded creation milliseconds plus the store id, so same-millisecond
//! inserts stay unique and time-sorted), `id` (S), `role` (S),
//! `createdAt` (N, epoch ms), `parts` (S, JSON document), and optional
//! `clientId` (S) and `metadata` (S, JSON document).

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use uuid::Uuid;

use murmur_core::models::message::{Message, MessageRole};

use crate::error::StoreError;

pub const ATTR_USER_ID: &str = "userId";
pub const ATTR_SORT_KEY: &str = "sk";

/// Sort key for a message: creation milliseconds (zero-padded so string
/// order matches numeric order) joined with the store id.
pub fn sort_key(created_at: jiff::Timestamp, id: Uuid) -> String {
    format!("{:016}#{}", created_at.as_millisecond(), id)
}

/// Marshal a message into a DynamoDB item.
pub fn to_item(message: &Message) -> Result<HashMap<String, AttributeValue>, StoreError> {
    let created_ms = message.created_at.as_millisecond();

    let mut item = HashMap::from([
        (
            ATTR_USER_ID.to_string(),
            AttributeValue::S(message.user_id.clone()),
        ),
        (
            ATTR_SORT_KEY.to_string(),
            AttributeValue::S(sort_key(message.created_at, message.id)),
        ),
        ("id".to_string(), AttributeValue::S(message.id.to_string())),
        (
            "role".to_string(),
            AttributeValue::S(message.role.as_str().to_string()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::N(created_ms.to_string()),
        ),
        (
            "parts".to_string(),
            AttributeValue::S(serde_json::to_string(&message.parts)?),
        ),
    ]);

    if let Some(client_id) = &message.client_id {
        item.insert(
            "clientId".to_string(),
            AttributeValue::S(client_id.clone()),
        );
    }
    if let Some(metadata) = &message.metadata {
        item.insert(
            "metadata".to_string(),
            AttributeValue::S(serde_json::to_string(metadata)?),
        );
    }

    Ok(item)
}

/// Unmarshal a DynamoDB item back into a message.
pub fn from_item(item: &HashMap<String, AttributeValue>) -> Result<Message, StoreError> {
    let id: Uuid = string_attr(item, "id")?
        .parse()
        .map_err(|e| StoreError::Malformed(format!("id: {e}")))?;
    let user_id = string_attr(item, ATTR_USER_ID)?.to_string();

    let role_str = string_attr(item, "role")?;
    let role = MessageRole::parse(role_str)
        .ok_or_else(|| StoreError::Malformed(format!("unknown role: {role_str}")))?;

    let created_ms: i64 = number_attr(item, "createdAt")?;
    let created_at = jiff::Timestamp::from_millisecond(created_ms)
        .map_err(|e| StoreError::Malformed(format!("createdAt: {e}")))?;

    let parts = serde_json::from_str(string_attr(item, "parts")?)?;

    let client_id = match item.get("clientId") {
        Some(AttributeValue::S(s)) => Some(s.clone()),
        _ => None,
    };
    let metadata = match item.get("metadata") {
        Some(AttributeValue::S(s)) => Some(serde_json::from_str(s)?),
        _ => None,
    };

    Ok(Message {
        id,
        user_id,
        role,
        parts,
        client_id,
        metadata,
        created_at,
    })
}

fn string_attr<'a>(
    item: &'a HashMap<String, AttributeValue>,
    name: &str,
) -> Result<&'a str, StoreError> {
    item.get(name)
        .and_then(|v| v.as_s().ok())
        .map(String::as_str)
        .ok_or_else(|| StoreError::Malformed(format!("missing string attribute: {name}")))
}

fn number_attr(item: &HashMap<String, AttributeValue>, name: &str) -> Result<i64, StoreError> {
    item.get(name)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| StoreError::Malformed(format!("missing numeric attribute: {name}")))
}
