//! Tests for HttpProvider against a local HTTP server.

use futures_util::StreamExt;
use persona_llm::{Client, General, HttpProvider, Message, Request, StreamChunk};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

const HI: &str = r#"{"choices":[{"index":0,"delta":{"content":"Hi "},"finish_reason":null}]}"#;
const THERE: &str = r#"{"choices":[{"index":0,"delta":{"content":"there"},"finish_reason":"stop"}]}"#;

/// Serve one response, returning the endpoint URL.
async fn serve(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: text/event-stream\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}/v1/chat/completions")
}

async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
        let length = head
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buf.len() >= end + 4 + length {
            return;
        }
    }
}

fn provider(endpoint: &str) -> HttpProvider {
    let client = Client::builder().no_proxy().build().unwrap();
    HttpProvider::no_auth(client, endpoint)
}

fn request() -> Request {
    Request::from(General::new("gpt-3.5-turbo"))
        .with_messages(vec![Message::user("hello")])
        .stream(false)
}

async fn collect(provider: &HttpProvider) -> Vec<anyhow::Result<StreamChunk>> {
    provider.stream_sse(request()).collect().await
}

#[tokio::test]
async fn stream_yields_decoded_chunks() {
    let body = format!("data: {HI}\n\ndata: {THERE}\n\ndata: [DONE]\n\n");
    let endpoint = serve("200 OK", body).await;

    let chunks = collect(&provider(&endpoint)).await;
    let contents: Vec<_> = chunks
        .iter()
        .map(|c| c.as_ref().unwrap().content().unwrap().to_owned())
        .collect();
    assert_eq!(contents, vec!["Hi ", "there"]);
}

#[tokio::test]
async fn stream_rejects_error_status_with_body() {
    let endpoint = serve(
        "500 Internal Server Error",
        r#"{"error":{"message":"boom"}}"#.into(),
    )
    .await;

    let chunks = collect(&provider(&endpoint)).await;
    assert_eq!(chunks.len(), 1);
    let err = chunks[0].as_ref().unwrap_err().to_string();
    assert!(err.contains("500"), "{err}");
    assert!(err.contains("boom"), "{err}");
}

#[tokio::test]
async fn stream_ends_on_error_payload() {
    let body = format!(
        "data: {HI}\n\ndata: {{\"error\":{{\"message\":\"overloaded\"}}}}\n\ndata: {THERE}\n\n"
    );
    let endpoint = serve("200 OK", body).await;

    let chunks = collect(&provider(&endpoint)).await;
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].as_ref().unwrap().content(), Some("Hi "));
    let err = chunks[1].as_ref().unwrap_err().to_string();
    assert!(err.contains("overloaded"), "{err}");
}

#[tokio::test]
async fn send_rejects_error_status_with_body() {
    let endpoint = serve("401 Unauthorized", "invalid api key".into()).await;

    let err = provider(&endpoint)
        .send(&request())
        .await
        .unwrap_err()
        .to_string();
    assert!(err.contains("401"), "{err}");
    assert!(err.contains("invalid api key"), "{err}");
}
