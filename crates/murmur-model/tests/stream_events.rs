use murmur_model::stream::{StreamEvent, StreamSummary};

#[test]
fn events_serialize_with_kebab_case_tags() {
    let delta = serde_json::to_value(StreamEvent::TextDelta {
        delta: "hi".to_string(),
    })
    .unwrap();
    assert_eq!(delta["type"], "text-delta");
    assert_eq!(delta["delta"], "hi");

    let finish = serde_json::to_value(StreamEvent::Finish {
        finish_reason: Some("end_turn".to_string()),
        total_tokens: Some(42),
    })
    .unwrap();
    assert_eq!(finish["type"], "finish");
    assert_eq!(finish["finishReason"], "end_turn");
    assert_eq!(finish["totalTokens"], 42);
}

#[test]
fn summary_accumulates_text_and_finish_fields() {
    let mut summary = StreamSummary::default();
    summary.absorb(&StreamEvent::TextDelta {
        delta: "hello ".to_string(),
    });
    summary.absorb(&StreamEvent::ReasoningDelta {
        delta: "ignored".to_string(),
    });
    summary.absorb(&StreamEvent::TextDelta {
        delta: "world".to_string(),
    });
    summary.absorb(&StreamEvent::Finish {
        finish_reason: Some("end_turn".to_string()),
        total_tokens: Some(7),
    });

    assert_eq!(summary.text, "hello world");
    assert_eq!(summary.finish_reason.as_deref(), Some("end_turn"));
    assert_eq!(summary.total_tokens, Some(7));
}

#[test]
fn summary_of_empty_stream_has_no_text() {
    let mut summary = StreamSummary::default();
    summary.absorb(&StreamEvent::Finish {
        finish_reason: None,
        total_tokens: None,
    });
    assert!(summary.text.is_empty());
}
