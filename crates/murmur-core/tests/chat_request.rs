use murmur_core::models::chat::ChatRequest;
use murmur_core::models::message::MessageRole;

fn request(json: &str) -> ChatRequest {
    serde_json::from_str(json).unwrap()
}

#[test]
fn last_user_turn_accepts_trailing_user_message() {
    let req = request(
        r#"{
            "messages": [
                {"id": "m0", "role": "assistant", "parts": [{"type": "text", "text": "hi"}]},
                {"id": "m1", "role": "user", "parts": [{"type": "text", "text": "hello"}]}
            ],
            "model": "gpt-4o-mini",
            "webSearch": false
        }"#,
    );

    let turn = req.last_user_turn().expect("trailing user turn");
    assert_eq!(turn.id, "m1");
    assert_eq!(turn.role, MessageRole::User);
}

#[test]
fn last_user_turn_rejects_trailing_assistant_message() {
    let req = request(
        r#"{
            "messages": [
                {"id": "m0", "role": "user", "parts": []},
                {"id": "m1", "role": "assistant", "parts": []}
            ],
            "model": "gpt-4o-mini",
            "webSearch": true
        }"#,
    );
    assert!(req.last_user_turn().is_none());
}

#[test]
fn last_user_turn_rejects_empty_list() {
    let req = request(r#"{"messages": [], "model": "gpt-4o-mini"}"#);
    assert!(req.last_user_turn().is_none());
    assert!(!req.web_search);
}
