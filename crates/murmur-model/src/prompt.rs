//! Conversion from stored conversation turns to the Converse wire format.

use aws_sdk_bedrockruntime::types::{ContentBlock, ConversationRole, Message as ConverseMessage};

use murmur_core::models::chat::IncomingMessage;
use murmur_core::models::message::{text_content, MessageRole};

use crate::error::ModelError;

/// Fixed system prompt for the chat endpoint.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that can answer questions and help with tasks";

/// Pick the inference backend for a request.
///
/// Selection is driven by the web-search flag alone: `true` routes to the
/// search-augmented model, `false` to the default fast model.
pub fn select_model<'a>(web_search: bool, default_model: &'a str, search_model: &'a str) -> &'a str {
    if web_search {
        search_model
    } else {
        default_model
    }
}

/// Convert the accumulated message list into Converse turns.
///
/// Only user and assistant turns are forwarded, and only their text
/// content — the system prompt is fixed server-side, and tool transcripts
/// or attachment parts are not replayed to the provider. Turns whose text
/// content is empty are dropped (the provider rejects empty content
/// blocks).
pub fn to_converse_messages(
    messages: &[IncomingMessage],
) -> Result<Vec<ConverseMessage>, ModelError> {
    let mut turns = Vec::new();

    for message in messages {
        let role = match message.role {
            MessageRole::User => ConversationRole::User,
            MessageRole::Assistant => ConversationRole::Assistant,
            MessageRole::System | MessageRole::Tool => continue,
        };

        let text = text_content(&message.parts);
        if text.is_empty() {
            continue;
        }

        let turn = ConverseMessage::builder()
            .role(role)
            .content(ContentBlock::Text(text))
            .build()
            .map_err(|e| ModelError::Invocation(e.to_string()))?;
        turns.push(turn);
    }

    Ok(turns)
}
