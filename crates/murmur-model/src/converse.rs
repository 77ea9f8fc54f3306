//! Streaming Converse invocation.

use aws_sdk_bedrockruntime::primitives::event_stream::EventReceiver;
use aws_sdk_bedrockruntime::types::error::ConverseStreamOutputError;
use aws_sdk_bedrockruntime::types::{
    ContentBlockDelta, ConverseStreamOutput as ProviderEvent, Message as ConverseMessage,
    ReasoningContentBlockDelta, SystemContentBlock,
};
use tracing::info;

use crate::error::ModelError;
use crate::stream::StreamEvent;

/// An in-flight streaming completion.
///
/// Yields deltas and source citations as the provider emits them, then
/// exactly one [`StreamEvent::Finish`] carrying the stop reason and token
/// usage, then `None`.
pub struct CompletionStream {
    receiver: EventReceiver<ProviderEvent, ConverseStreamOutputError>,
    finish_reason: Option<String>,
    total_tokens: Option<u64>,
    done: bool,
}

/// Start a streaming completion for a conversation.
///
/// The caller provides the full turn history and the model id (an
/// inference profile id). Fails before any event is produced when the
/// invocation itself is rejected.
pub async fn start_completion(
    config: &aws_config::SdkConfig,
    model_id: &str,
    system_prompt: &str,
    messages: Vec<ConverseMessage>,
) -> Result<CompletionStream, ModelError> {
    let client = aws_sdk_bedrockruntime::Client::new(config);

    let response = client
        .converse_stream()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .set_messages(Some(messages))
        .send()
        .await
        .map_err(|e| ModelError::Invocation(e.into_service_error().to_string()))?;

    info!(model_id, "started streaming completion");

    Ok(CompletionStream {
        receiver: response.stream,
        finish_reason: None,
        total_tokens: None,
        done: false,
    })
}

impl CompletionStream {
    /// Next client-facing event, or `None` once the stream is exhausted.
    pub async fn next_event(&mut self) -> Result<Option<StreamEvent>, ModelError> {
        if self.done {
            return Ok(None);
        }

        loop {
            let event = self
                .receiver
                .recv()
                .await
                .map_err(|e| ModelError::Stream(e.to_string()))?;

            let Some(event) = event else {
                self.done = true;
                return Ok(Some(StreamEvent::Finish {
                    finish_reason: self.finish_reason.take(),
                    total_tokens: self.total_tokens.take(),
                }));
            };

            match event {
                ProviderEvent::ContentBlockDelta(ev) => match ev.delta {
                    Some(ContentBlockDelta::Text(delta)) => {
                        return Ok(Some(StreamEvent::TextDelta { delta }));
                    }
                    Some(ContentBlockDelta::ReasoningContent(
                        ReasoningContentBlockDelta::Text(delta),
                    )) => {
                        return Ok(Some(StreamEvent::ReasoningDelta { delta }));
                    }
                    Some(ContentBlockDelta::Citation(citation)) => {
                        return Ok(Some(StreamEvent::Source {
                            url: None,
                            title: citation.title,
                        }));
                    }
                    _ => {}
                },
                ProviderEvent::MessageStop(ev) => {
                    self.finish_reason = Some(ev.stop_reason.as_str().to_string());
                }
                ProviderEvent::Metadata(ev) => {
                    if let Some(usage) = ev.usage {
                        self.total_tokens = Some(usage.total_tokens as u64);
                    }
                }
                _ => {}
            }
        }
    }
}
