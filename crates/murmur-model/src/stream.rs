//! Stream event vocabulary shared between the provider relay and the
//! HTTP surface.

use serde::{Deserialize, Serialize};

/// One incremental event of a streaming completion, as delivered to the
/// browser client (serialized into SSE frames by the chat route).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum StreamEvent {
    TextDelta {
        delta: String,
    },
    ReasoningDelta {
        delta: String,
    },
    Source {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Finish {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        finish_reason: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        total_tokens: Option<u64>,
    },
    Error {
        message: String,
    },
}

/// Accumulated view of a completed stream, used to persist the assistant
/// turn after the response has been delivered.
#[derive(Debug, Default, Clone)]
pub struct StreamSummary {
    pub text: String,
    pub finish_reason: Option<String>,
    pub total_tokens: Option<u64>,
}

impl StreamSummary {
    /// Fold one stream event into the summary.
    pub fn absorb(&mut self, event: &StreamEvent) {
        match event {
            StreamEvent::TextDelta { delta } => self.text.push_str(delta),
            StreamEvent::Finish {
                finish_reason,
                total_tokens,
            } => {
                self.finish_reason = finish_reason.clone();
                self.total_tokens = *total_tokens;
            }
            _ => {}
        }
    }
}
