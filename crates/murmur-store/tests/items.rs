use aws_sdk_dynamodb::types::AttributeValue;
use uuid::Uuid;

use murmur_core::models::message::{Message, MessagePart, MessageRole};
use murmur_store::item::{from_item, sort_key, to_item};

fn sample_message() -> Message {
    Message {
        id: Uuid::new_v4(),
        user_id: "user_2abc".to_string(),
        role: MessageRole::User,
        parts: vec![MessagePart::Text {
            text: "hello".to_string(),
        }],
        client_id: Some("m1".to_string()),
        metadata: Some(
            serde_json::from_str(r#"{"source":"chat-api","timestamp":1700000000000}"#).unwrap(),
        ),
        created_at: jiff::Timestamp::from_millisecond(1_700_000_000_000).unwrap(),
    }
}

#[test]
fn item_preserves_every_field() {
    let message = sample_message();
    let item = to_item(&message).unwrap();
    let back = from_item(&item).unwrap();

    assert_eq!(back.id, message.id);
    assert_eq!(back.user_id, message.user_id);
    assert_eq!(back.role, MessageRole::User);
    assert_eq!(back.client_id.as_deref(), Some("m1"));
    assert_eq!(back.created_at, message.created_at);
    assert_eq!(back.parts.len(), 1);
    assert_eq!(back.parts[0].as_text(), Some("hello"));
    assert_eq!(back.metadata.unwrap()["source"], "chat-api");
}

#[test]
fn optional_fields_are_omitted_when_absent() {
    let mut message = sample_message();
    message.client_id = None;
    message.metadata = None;

    let item = to_item(&message).unwrap();
    assert!(!item.contains_key("clientId"));
    assert!(!item.contains_key("metadata"));

    let back = from_item(&item).unwrap();
    assert!(back.client_id.is_none());
    assert!(back.metadata.is_none());
}

#[test]
fn sort_key_orders_by_creation_time() {
    let id = Uuid::new_v4();
    let earlier = sort_key(jiff::Timestamp::from_millisecond(999).unwrap(), id);
    let later = sort_key(jiff::Timestamp::from_millisecond(1_700_000_000_000).unwrap(), id);

    // Zero padding makes lexicographic order match numeric order.
    assert!(earlier < later);
    assert!(earlier.starts_with("0000000000000999#"));
}

#[test]
fn same_millisecond_inserts_get_distinct_keys() {
    let ts = jiff::Timestamp::from_millisecond(1_700_000_000_000).unwrap();
    let a = sort_key(ts, Uuid::new_v4());
    let b = sort_key(ts, Uuid::new_v4());
    assert_ne!(a, b);
}

#[test]
fn unknown_role_in_item_is_rejected() {
    let message = sample_message();
    let mut item = to_item(&message).unwrap();
    item.insert(
        "role".to_string(),
        AttributeValue::S("admin".to_string()),
    );

    assert!(from_item(&item).is_err());
}
