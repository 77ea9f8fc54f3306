use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Open-ended metadata bag carried on a message (timestamp, originating
/// surface, model name, token usage, finish reason). Additive only — no
/// fixed schema.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A persisted chat message, the sole stored entity.
///
/// `user_id` is set once at creation from the authenticated caller and
/// never reassigned. Messages are immutable after creation except for
/// deletion via the per-user clear sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Store-assigned id, globally unique.
    pub id: Uuid,
    /// Identity-provider subject of the owning user.
    pub user_id: String,
    pub role: MessageRole,
    pub parts: Vec<MessagePart>,
    /// Client-supplied echo id, kept so the browser can reconcile
    /// optimistic UI state with the stored row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    /// Creation time; epoch milliseconds on the wire.
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    pub created_at: jiff::Timestamp,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    Tool,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
            MessageRole::Tool => "tool",
        }
    }

    pub fn parse(s: &str) -> Option<MessageRole> {
        match s {
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            "system" => Some(MessageRole::System),
            "tool" => Some(MessageRole::Tool),
            _ => None,
        }
    }
}

/// One tagged segment of a message's content.
///
/// The tag vocabulary follows the UI message wire format: `text`,
/// `reasoning`, `file`, `source-url`, `tool-call`, `tool-result`,
/// `step-start`. Segments written by untrusted clients may carry tags we
/// don't know yet; those deserialize into [`MessagePart::Unknown`] and
/// round-trip unaltered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum MessagePart {
    Text {
        text: String,
    },
    Reasoning {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    File {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        media_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<u64>,
    },
    #[serde(rename_all = "camelCase")]
    SourceUrl {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ToolCall {
        tool_call_id: String,
        tool_name: String,
        #[serde(default)]
        input: serde_json::Value,
    },
    #[serde(rename_all = "camelCase")]
    ToolResult {
        tool_call_id: String,
        tool_name: String,
        #[serde(default)]
        output: serde_json::Value,
    },
    StepStart,
    /// Forward-compatibility catch-all: any segment whose tag we don't
    /// recognize is preserved as-is.
    #[serde(untagged)]
    Unknown(serde_json::Value),
}

impl MessagePart {
    /// Text content of this part, if it is a text segment.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// Concatenated text content of a message's parts.
pub fn text_content(parts: &[MessagePart]) -> String {
    parts
        .iter()
        .filter_map(MessagePart::as_text)
        .collect::<Vec<_>>()
        .join("")
}
