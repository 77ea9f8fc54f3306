use serde::{Deserialize, Serialize};

use super::message::{Metadata, MessagePart, MessageRole};

/// A message as sent by the browser client — no owner or creation time
/// yet, those are assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingMessage {
    pub id: String,
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<IncomingMessage>,
    /// Model name the client asked for. Logged for observability; backend
    /// selection is driven by `web_search`, not by this string.
    pub model: String,
    #[serde(default)]
    pub web_search: bool,
}

impl ChatRequest {
    /// The fresh user turn this request ends on.
    ///
    /// Returns `None` when the message list is empty or its last entry is
    /// not a user message — such requests are rejected with 400.
    pub fn last_user_turn(&self) -> Option<&IncomingMessage> {
        self.messages
            .last()
            .filter(|m| m.role == MessageRole::User)
    }
}
