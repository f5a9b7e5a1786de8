//! OpenAI-compatible chat completions request body.
//!
//! Optional fields use `skip_serializing_if` so the provider defaults apply
//! when they are unset.

use crate::{General, Message};
use compact_str::CompactString;
use serde::Serialize;
use serde_json::{Value, json};

/// Chat completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The messages to send.
    pub messages: Vec<Message>,
    /// The model identifier.
    pub model: CompactString,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,
    /// Whether to stream the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Stream options (e.g. include_usage).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_options: Option<Value>,
    /// Temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl Request {
    /// Set the messages for this request.
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Enable streaming for the request.
    pub fn stream(mut self, usage: bool) -> Self {
        self.stream = Some(true);
        self.stream_options = if usage {
            Some(json!({ "include_usage": true }))
        } else {
            None
        };
        self
    }

    /// Whether this request asks for a streamed response.
    pub fn is_stream(&self) -> bool {
        self.stream.unwrap_or(false)
    }
}

impl From<General> for Request {
    fn from(general: General) -> Self {
        Self {
            messages: Vec::new(),
            model: general.model,
            max_tokens: general.max_tokens,
            stream: None,
            stream_options: None,
            temperature: general.temperature,
        }
    }
}

impl From<&General> for Request {
    fn from(general: &General) -> Self {
        Self::from(general.clone())
    }
}
