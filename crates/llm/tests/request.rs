//! Tests for the chat completions Request body.

use persona_llm::{General, Message, Request};

#[test]
fn request_from_general_sets_model() {
    let req = Request::from(General::new("gpt-4"));
    assert_eq!(req.model, "gpt-4");
    assert!(req.messages.is_empty());
}

#[test]
fn request_omits_unset_options() {
    let req = Request::from(General::new("gpt-4")).with_messages(vec![Message::user("hi")]);
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "messages": [{ "role": "user", "content": "hi" }],
            "model": "gpt-4",
        })
    );
}

#[test]
fn request_carries_sampling_options() {
    let general = General::new("gpt-4").temperature(0.5).max_tokens(256);
    let json = serde_json::to_value(Request::from(&general)).unwrap();
    assert_eq!(json["temperature"], 0.5);
    assert_eq!(json["max_tokens"], 256);
}

#[test]
fn request_stream_sets_include_usage() {
    let req = Request::from(General::default()).stream(true);
    assert_eq!(req.stream, Some(true));
    assert!(req.is_stream());
    let opts = req.stream_options.expect("stream_options");
    assert_eq!(opts["include_usage"], true);
}

#[test]
fn request_stream_without_usage_omits_stream_options() {
    let req = Request::from(General::default()).stream(false);
    assert_eq!(req.stream, Some(true));
    assert!(req.stream_options.is_none());
}

#[test]
fn general_default_model() {
    assert_eq!(General::default().model, "gpt-3.5-turbo");
}
