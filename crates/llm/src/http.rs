//! Shared HTTP transport for OpenAI-compatible chat completion endpoints.
//!
//! `HttpProvider` wraps a `reqwest::Client` with pre-configured headers and
//! endpoint URL. Provides `send()` for non-streaming and `stream_sse()` for
//! Server-Sent Events streaming.

use crate::{Response, StreamChunk};
use anyhow::Result;
use async_stream::try_stream;
use futures_core::Stream;
use futures_util::StreamExt;
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderValue},
};
use serde::Serialize;
use serde_json::Value;

/// Shared HTTP transport for OpenAI-compatible providers.
///
/// Holds a `reqwest::Client`, pre-built headers (auth + content-type),
/// and the target endpoint URL.
#[derive(Clone)]
pub struct HttpProvider {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
}

impl HttpProvider {
    /// Create a provider with Bearer token authentication.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut headers = json_headers();
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            endpoint: endpoint.to_owned(),
        })
    }

    /// Create a provider without authentication (e.g. a local server).
    pub fn no_auth(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            headers: json_headers(),
            endpoint: endpoint.to_owned(),
        }
    }

    /// Send a non-streaming request and deserialize the response as JSON.
    pub async fn send(&self, body: &impl Serialize) -> Result<Response> {
        tracing::trace!("request: {}", serde_json::to_string(body)?);
        let response = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;

        let text = ensure_success(response).await?.text().await?;
        tracing::trace!("response: {}", text);
        serde_json::from_str(&text).map_err(Into::into)
    }

    /// Stream an SSE response (OpenAI-compatible format).
    ///
    /// Decodes `data: ` lines across network chunk boundaries, skips the
    /// `[DONE]` sentinel, and deserializes each payload as [`StreamChunk`].
    /// An `error` payload sent mid-stream ends the stream with an error.
    pub fn stream_sse(
        &self,
        body: impl Serialize,
    ) -> impl Stream<Item = Result<StreamChunk>> + Send {
        if let Ok(body) = serde_json::to_string(&body) {
            tracing::trace!("request: {}", body);
        }
        let request = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(&body);

        try_stream! {
            let response = ensure_success(request.send().await?).await?;
            let mut decoder = SseDecoder::default();
            let mut stream = response.bytes_stream();
            while let Some(next) = stream.next().await {
                let bytes = next?;
                tracing::trace!("chunk: {}", String::from_utf8_lossy(&bytes));
                for data in decoder.push(&bytes) {
                    if let Some(chunk) = parse_chunk(&data)? {
                        yield chunk;
                    }
                }
            }

            let tail = match decoder.finish() {
                Some(data) => parse_chunk(&data)?,
                None => None,
            };
            if let Some(chunk) = tail {
                yield chunk;
            }
        }
    }

    /// Get the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

/// Incremental decoder for `text/event-stream` bodies.
///
/// Network chunks may split a line (or a UTF-8 sequence) anywhere, so bytes
/// are buffered until a newline arrives.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
}

impl SseDecoder {
    /// Feed raw bytes, returning the data payloads of every completed line.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(bytes);
        let mut payloads = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            if let Some(data) = data_of(&line) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Flush a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<String> {
        let line = std::mem::take(&mut self.pending);
        data_of(&line)
    }
}

fn data_of(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(['\r', '\n']);
    let data = line.strip_prefix("data:")?.trim_start();
    if data.is_empty() || data == "[DONE]" {
        return None;
    }
    Some(data.to_owned())
}

/// Parse one SSE payload.
///
/// Malformed payloads are logged and skipped, an `{"error": ...}` payload is
/// returned as an error.
pub fn parse_chunk(data: &str) -> Result<Option<StreamChunk>> {
    let value = match serde_json::from_str::<Value>(data) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("failed to parse chunk: {e}, data: {data}");
            return Ok(None);
        }
    };

    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string());
        anyhow::bail!("chat completion stream failed: {message}");
    }

    match serde_json::from_value::<StreamChunk>(value) {
        Ok(chunk) => Ok(Some(chunk)),
        Err(e) => {
            tracing::warn!("failed to parse chunk: {e}, data: {data}");
            Ok(None)
        }
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("chat completion request failed with {status}: {body}")
}
