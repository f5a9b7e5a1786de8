//! Tests for the scripted provider and message helpers.

use futures_util::StreamExt;
use persona_llm::{General, LLM, Message, Request, Role, Scripted, estimate_tokens};

#[tokio::test]
async fn stream_yields_word_tokens_then_stops() {
    let provider = Scripted::new(["Hello there friend"]);
    let request = Request::from(General::default()).with_messages(vec![Message::user("hi")]);

    let chunks: Vec<_> = provider.stream(request).collect().await;
    let tokens: Vec<_> = chunks
        .iter()
        .filter_map(|c| c.as_ref().unwrap().content().map(str::to_owned))
        .collect();
    assert_eq!(tokens, vec!["Hello ", "there ", "friend"]);
    assert!(chunks.last().unwrap().as_ref().unwrap().reason().is_some());

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages[0].content, "hi");
}

#[tokio::test]
async fn send_pops_replies_in_order() {
    let provider = Scripted::new(["one", "two"]);
    let request = Request::from(General::default());

    let first = provider.send(&request).await.unwrap();
    let second = provider.send(&request).await.unwrap();
    assert_eq!(first.content(), Some("one"));
    assert_eq!(second.content(), Some("two"));
    assert_eq!(provider.remaining(), 0);
    assert!(provider.send(&request).await.is_err());
}

#[test]
fn builder_accumulates_content() {
    let mut builder = Message::builder(Role::Assistant);
    for token in Scripted::tokens("a b c") {
        builder.accept(&persona_llm::StreamChunk::text(token));
    }
    let message = builder.build();
    assert_eq!(message, Message::assistant("a b c"));
}

#[test]
fn token_estimate_has_floor_of_one() {
    assert_eq!(Message::user("").estimate_tokens(), 1);
    assert_eq!(Message::user("abcdefgh").estimate_tokens(), 2);
    assert_eq!(
        estimate_tokens(&[Message::user("abcdefgh"), Message::assistant("abcd")]),
        3
    );
}
