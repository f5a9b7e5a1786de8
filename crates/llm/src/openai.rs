//! OpenAI-compatible chat completions provider.

use crate::{HttpProvider, LLM, Request, Response, StreamChunk};
use anyhow::Result;
use futures_core::Stream;
use reqwest::Client;

/// The OpenAI chat completions endpoint.
pub const ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// A provider for OpenAI and any server speaking its chat completions API.
#[derive(Clone)]
pub struct OpenAI {
    http: HttpProvider,
}

impl OpenAI {
    /// Create a provider for the hosted OpenAI API.
    pub fn api(client: Client, key: &str) -> Result<Self> {
        Self::custom(client, Some(key), ENDPOINT)
    }

    /// Create a provider for a custom endpoint, authenticated when a key is
    /// given.
    pub fn custom(client: Client, key: Option<&str>, endpoint: &str) -> Result<Self> {
        let http = match key {
            Some(key) => HttpProvider::bearer(client, key, endpoint)?,
            None => HttpProvider::no_auth(client, endpoint),
        };
        Ok(Self { http })
    }

    /// Get the underlying transport.
    pub fn http(&self) -> &HttpProvider {
        &self.http
    }
}

impl LLM for OpenAI {
    async fn send(&self, request: &Request) -> Result<Response> {
        self.http.send(request).await
    }

    fn stream(&self, request: Request) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let body = if request.is_stream() {
            request
        } else {
            request.stream(false)
        };
        self.http.stream_sse(body)
    }
}
