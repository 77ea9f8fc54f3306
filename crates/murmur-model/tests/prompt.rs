use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole};

use murmur_core::models::chat::IncomingMessage;
use murmur_core::models::message::{MessagePart, MessageRole};
use murmur_model::prompt::{select_model, to_converse_messages};

fn turn(role: MessageRole, text: &str) -> IncomingMessage {
    IncomingMessage {
        id: "m".to_string(),
        role,
        parts: vec![MessagePart::Text {
            text: text.to_string(),
        }],
        metadata: None,
    }
}

#[test]
fn select_model_is_driven_by_the_flag() {
    assert_eq!(select_model(false, "fast", "search"), "fast");
    assert_eq!(select_model(true, "fast", "search"), "search");
}

#[test]
fn user_and_assistant_turns_are_forwarded() {
    let turns = to_converse_messages(&[
        turn(MessageRole::User, "hi"),
        turn(MessageRole::Assistant, "hello"),
    ])
    .unwrap();

    assert_eq!(turns.len(), 2);
    assert_eq!(*turns[0].role(), ConversationRole::User);
    assert_eq!(*turns[1].role(), ConversationRole::Assistant);
    assert!(matches!(&turns[0].content()[0], ContentBlock::Text(t) if t == "hi"));
}

#[test]
fn system_and_tool_turns_are_not_replayed() {
    let turns = to_converse_messages(&[
        turn(MessageRole::System, "be nice"),
        turn(MessageRole::User, "hi"),
        turn(MessageRole::Tool, "result"),
    ])
    .unwrap();

    assert_eq!(turns.len(), 1);
    assert_eq!(*turns[0].role(), ConversationRole::User);
}

#[test]
fn turns_without_text_content_are_dropped() {
    let mut empty = turn(MessageRole::User, "");
    empty.parts = vec![MessagePart::StepStart];

    let turns = to_converse_messages(&[empty, turn(MessageRole::User, "hi")]).unwrap();
    assert_eq!(turns.len(), 1);
}
