//! Tests for the REPL loop against a scripted model.

use chain::Conversation;
use chrono::{TimeZone, Utc};
use llm::Scripted;
use persona::{Config, Repl, repl::stamp};

fn repl(provider: Scripted, json: &str) -> Repl<Scripted, Vec<u8>> {
    let config = Config::parse(json).unwrap();
    let conversation = Conversation::new(
        provider,
        config.general(),
        config.prompt().unwrap(),
        config.memory().unwrap(),
    )
    .unwrap();
    Repl::new(conversation, Vec::new()).timestamp(config.timestamp)
}

#[tokio::test]
async fn one_turn_emits_exact_frame() {
    let provider = Scripted::new(["Ahoy there"]);
    let mut repl = repl(
        provider.clone(),
        r#"{"synopsis": "A pirate.", "timestamp": false}"#,
    );

    repl.run(&b"hello\n"[..], std::future::pending())
        .await
        .unwrap();

    let buffer = r#"[{"type":"human","data":{"content":"hello","additional_kwargs":{}}},{"type":"ai","data":{"content":"Ahoy there","additional_kwargs":{}}}]"#;
    let mut expected = b"\x02Ahoy \x1Fthere\x1F\x03\x1D\x1E".to_vec();
    expected.extend_from_slice(buffer.as_bytes());
    expected.push(0x04);
    assert_eq!(repl.output(), &expected);

    let prompt = &provider.requests()[0].messages[0].content;
    assert!(prompt.contains("A pirate."));
    assert!(prompt.ends_with("Human: hello\nAI:"));
}

#[tokio::test]
async fn overflowing_turn_emits_new_summary() {
    let provider = Scripted::new(["Ahoy there", "The human greeted a pirate."]);
    let mut repl = repl(
        provider.clone(),
        r#"{"synopsis": "A pirate.", "timestamp": false, "max_token_limit": 1}"#,
    );

    repl.run(&b"hello\n"[..], std::future::pending())
        .await
        .unwrap();

    assert_eq!(
        repl.output(),
        &b"\x02Ahoy \x1Fthere\x1F\x03\x1DThe human greeted a pirate.\x1E[]\x04".to_vec()
    );
    assert_eq!(provider.requests().len(), 2);
}

#[tokio::test]
async fn each_line_is_one_turn() {
    let provider = Scripted::new(["one", "two"]);
    let mut repl = repl(
        provider.clone(),
        r#"{"synopsis": "x", "timestamp": false}"#,
    );

    repl.run(&b"first\nsecond\n"[..], std::future::pending())
        .await
        .unwrap();

    let output = repl.output();
    assert_eq!(output.iter().filter(|b| **b == 0x04).count(), 2);
    assert_eq!(output.iter().filter(|b| **b == 0x02).count(), 2);
    assert_eq!(repl.conversation().memory().buffer().len(), 4);

    let second = &provider.requests()[1].messages[0].content;
    assert!(second.contains("Human: first\nAI: one\nHuman: second\nAI:"));
}

#[tokio::test]
async fn interrupt_while_reading_emits_nothing() {
    let provider = Scripted::new(["unused"]);
    let mut repl = repl(provider.clone(), r#"{"synopsis": "x"}"#);

    // keep the writer alive so reading blocks instead of hitting EOF
    let (_writer, reader) = tokio::io::duplex(64);
    repl.run(tokio::io::BufReader::new(reader), async {})
        .await
        .unwrap();

    assert!(repl.output().is_empty());
    assert!(provider.requests().is_empty());
    assert_eq!(provider.remaining(), 1);
}

#[tokio::test]
async fn end_of_input_exits_cleanly() {
    let provider = Scripted::default();
    let mut repl = repl(provider, r#"{"synopsis": "x"}"#);
    repl.run(&b""[..], std::future::pending()).await.unwrap();
    assert!(repl.output().is_empty());
}

#[tokio::test]
async fn inputs_are_timestamped() {
    let provider = Scripted::new(["ok"]);
    let mut repl = repl(provider.clone(), r#"{"synopsis": "x"}"#);

    repl.run(&b"hello\n"[..], std::future::pending())
        .await
        .unwrap();

    let stored = &repl.conversation().memory().buffer()[0].content;
    assert!(stored.starts_with('['));
    assert!(stored.ends_with("] hello"));
    assert_eq!(stored.len(), "[2026-01-01T00:00:00Z] hello".len());
}

#[test]
fn stamp_format() {
    let now = Utc.with_ymd_and_hms(2023, 5, 1, 9, 30, 5).unwrap();
    assert_eq!(stamp(now, "hi"), "[2023-05-01T09:30:05Z] hi");
}
