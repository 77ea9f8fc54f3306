//! The chat endpoint: persist the user turn, stream a completion back to
//! the client, and persist the assistant turn once the stream has closed.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, KeepAliveStream, Sse};
use axum::{Extension, Json};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};

use murmur_auth::identity::Identity;
use murmur_core::models::chat::ChatRequest;
use murmur_core::models::message::{MessagePart, MessageRole, Metadata};
use murmur_model::converse::{start_completion, CompletionStream};
use murmur_model::error::ModelError;
use murmur_model::prompt::{select_model, to_converse_messages, SYSTEM_PROMPT};
use murmur_model::stream::{StreamEvent, StreamSummary};
use murmur_store::messages;

use crate::error::ApiError;
use crate::state::AppState;

pub type ChatResponse = Sse<KeepAliveStream<ReceiverStream<Result<Event, Infallible>>>>;

/// `POST /api/chat` — single pass, no retries.
///
/// The request must end on a fresh user turn; that turn is persisted
/// before the model is invoked, because an answered-but-unpersisted turn
/// would corrupt history. The completion is relayed as SSE without
/// buffering; the assistant write happens after the stream closes and is
/// best effort.
pub async fn chat(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(request): Json<ChatRequest>,
) -> Result<ChatResponse, ApiError> {
    let last = request
        .last_user_turn()
        .ok_or_else(|| {
            ApiError::BadRequest("invalid request: last message must be from user".to_string())
        })?
        .clone();

    let metadata = tagged_metadata(last.metadata, "chat-api");
    messages::add_user_message(
        &state.db,
        &state.table,
        &identity,
        last.parts,
        last.id,
        Some(metadata),
    )
    .await?;

    let model_id = select_model(
        request.web_search,
        &state.default_model_id,
        &state.search_model_id,
    )
    .to_string();
    info!(requested = %request.model, model_id = %model_id, "invoking model");

    let turns = to_converse_messages(&request.messages)?;
    let completion = start_completion(&state.config, &model_id, SYSTEM_PROMPT, turns).await?;

    let (tx, rx) = mpsc::channel(32);
    // The handle is the observable completion signal for the detached
    // assistant write; production drops it, tests may await it.
    let _relay = tokio::spawn(relay_completion(state, identity, model_id, completion, tx));

    Ok(Sse::new(ReceiverStream::new(rx)).keep_alive(KeepAlive::default()))
}

/// Pump provider events into the SSE channel, then persist the assistant
/// turn. The channel is dropped before the write starts, so the client
/// may see the stream end while the write is still in flight — no
/// ordering is guaranteed between the two.
async fn relay_completion(
    state: AppState,
    identity: Identity,
    model_id: String,
    completion: CompletionStream,
    tx: mpsc::Sender<Result<Event, Infallible>>,
) {
    let summary = drain_events(completion, tx).await;
    persist_assistant_turn(&state, &identity, &model_id, summary).await;
}

/// Source of completion events. Seam between the relay loop and the
/// provider stream.
trait EventSource {
    async fn next_event(&mut self) -> Result<Option<StreamEvent>, ModelError>;
}

impl EventSource for CompletionStream {
    async fn next_event(&mut self) -> Result<Option<StreamEvent>, ModelError> {
        CompletionStream::next_event(self).await
    }
}

/// Relay events to the client and accumulate the summary the assistant
/// write persists. A client disconnect stops the sends but not the
/// drain — the stored turn must carry the model's full output, not the
/// prefix that happened to be delivered.
async fn drain_events<S: EventSource>(
    mut source: S,
    tx: mpsc::Sender<Result<Event, Infallible>>,
) -> StreamSummary {
    let mut summary = StreamSummary::default();
    let mut client_connected = true;

    loop {
        match source.next_event().await {
            Ok(Some(event)) => {
                summary.absorb(&event);
                if client_connected && !send_event(&tx, &event).await {
                    client_connected = false;
                }
            }
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "completion stream failed");
                if client_connected {
                    send_event(
                        &tx,
                        &StreamEvent::Error {
                            message: "model stream failed".to_string(),
                        },
                    )
                    .await;
                }
                break;
            }
        }
    }

    summary
}

async fn send_event(
    tx: &mpsc::Sender<Result<Event, Infallible>>,
    event: &StreamEvent,
) -> bool {
    match Event::default().json_data(event) {
        Ok(frame) => tx.send(Ok(frame)).await.is_ok(),
        Err(e) => {
            error!(error = %e, "failed to encode stream event");
            false
        }
    }
}

/// Best-effort assistant write: failure is logged and swallowed, never
/// surfaced to the client.
async fn persist_assistant_turn(
    state: &AppState,
    identity: &Identity,
    model_id: &str,
    summary: StreamSummary,
) {
    let mut metadata = Metadata::new();
    metadata.insert(
        "timestamp".to_string(),
        jiff::Timestamp::now().as_millisecond().into(),
    );
    metadata.insert("source".to_string(), "model-api".into());
    metadata.insert("model".to_string(), model_id.into());
    if let Some(tokens) = summary.total_tokens {
        metadata.insert("tokens".to_string(), tokens.into());
    }
    if let Some(reason) = &summary.finish_reason {
        metadata.insert("finishReason".to_string(), reason.clone().into());
    }

    let result = messages::add_assistant_message_public(
        &state.db,
        &state.table,
        identity,
        MessageRole::Assistant,
        assistant_parts(&summary),
        Some(metadata),
    )
    .await;

    if let Err(e) = result {
        error!(error = %e, "failed to persist assistant message");
    }
}

/// Empty parts when the model produced no text.
fn assistant_parts(summary: &StreamSummary) -> Vec<MessagePart> {
    if summary.text.is_empty() {
        Vec::new()
    } else {
        vec![MessagePart::Text {
            text: summary.text.clone(),
        }]
    }
}

/// Server metadata for a persisted user turn: timestamp and originating
/// surface, with any client-supplied entries layered on top (client keys
/// win on collision, matching the additive metadata contract).
fn tagged_metadata(client: Option<Metadata>, source: &str) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(
        "timestamp".to_string(),
        jiff::Timestamp::now().as_millisecond().into(),
    );
    metadata.insert("source".to_string(), source.into());
    if let Some(client) = client {
        metadata.extend(client);
    }
    metadata
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    struct ScriptedEvents(VecDeque<Result<Option<StreamEvent>, ModelError>>);

    impl EventSource for ScriptedEvents {
        async fn next_event(&mut self) -> Result<Option<StreamEvent>, ModelError> {
            self.0.pop_front().unwrap_or(Ok(None))
        }
    }

    fn scripted(events: Vec<StreamEvent>) -> ScriptedEvents {
        ScriptedEvents(events.into_iter().map(|e| Ok(Some(e))).collect())
    }

    fn transcript() -> Vec<StreamEvent> {
        vec![
            StreamEvent::TextDelta {
                delta: "hello ".to_string(),
            },
            StreamEvent::TextDelta {
                delta: "world".to_string(),
            },
            StreamEvent::Finish {
                finish_reason: Some("end_turn".to_string()),
                total_tokens: Some(5),
            },
        ]
    }

    #[tokio::test]
    async fn drain_relays_frames_and_accumulates_summary() {
        let (tx, mut rx) = mpsc::channel(8);

        let summary = drain_events(scripted(transcript()), tx).await;

        assert_eq!(summary.text, "hello world");
        assert_eq!(summary.finish_reason.as_deref(), Some("end_turn"));

        let mut frames = 0;
        while rx.recv().await.is_some() {
            frames += 1;
        }
        assert_eq!(frames, 3);
    }

    #[tokio::test]
    async fn drain_continues_after_client_disconnect() {
        let (tx, rx) = mpsc::channel(1);
        // Client gone before the first frame is delivered.
        drop(rx);

        let summary = drain_events(scripted(transcript()), tx).await;

        assert_eq!(summary.text, "hello world");
        assert_eq!(summary.finish_reason.as_deref(), Some("end_turn"));
        assert_eq!(summary.total_tokens, Some(5));
    }

    #[tokio::test]
    async fn drain_stops_at_stream_error_but_keeps_prior_text() {
        let mut events = scripted(vec![StreamEvent::TextDelta {
            delta: "partial".to_string(),
        }]);
        events
            .0
            .push_back(Err(ModelError::Stream("connection reset".to_string())));

        let (tx, mut rx) = mpsc::channel(8);
        let summary = drain_events(events, tx).await;

        assert_eq!(summary.text, "partial");
        assert!(summary.finish_reason.is_none());

        // Delta frame plus the error frame.
        let mut frames = 0;
        while rx.recv().await.is_some() {
            frames += 1;
        }
        assert_eq!(frames, 2);
    }

    #[test]
    fn tagged_metadata_lets_client_keys_win() {
        let client: Metadata =
            serde_json::from_str(r#"{"source":"mobile","surface":"ios"}"#).unwrap();
        let merged = tagged_metadata(Some(client), "chat-api");

        assert_eq!(merged["source"], "mobile");
        assert_eq!(merged["surface"], "ios");
        assert!(merged.contains_key("timestamp"));
    }

    #[test]
    fn tagged_metadata_defaults_to_server_source() {
        let merged = tagged_metadata(None, "chat-api");
        assert_eq!(merged["source"], "chat-api");
    }

    #[test]
    fn assistant_parts_empty_when_no_text_was_produced() {
        let summary = StreamSummary::default();
        assert!(assistant_parts(&summary).is_empty());

        let mut with_text = StreamSummary::default();
        with_text.absorb(&StreamEvent::TextDelta {
            delta: "hi".to_string(),
        });
        assert_eq!(assistant_parts(&with_text).len(), 1);
    }
}
