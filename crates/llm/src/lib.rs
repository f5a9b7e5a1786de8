//! OpenAI-compatible chat completion types and transport.
//!
//! This crate provides the shared types used to talk to a hosted chat model:
//! `Message`, `Request`, `Response`, `StreamChunk`, `General`, and the `LLM`
//! trait. `HttpProvider` implements the HTTP + server-sent-events transport
//! and `OpenAI` wires it to the chat completions endpoint.

pub use config::General;
pub use http::{HttpProvider, SseDecoder, parse_chunk};
pub use message::{Message, MessageBuilder, Role, estimate_tokens};
pub use openai::{ENDPOINT, OpenAI};
pub use provider::LLM;
pub use request::Request;
pub use reqwest::{self, Client};
pub use response::{Choice, CompletionMeta, Delta, FinishReason, Response, Usage};
#[cfg(feature = "testing")]
pub use scripted::Scripted;
pub use stream::StreamChunk;

mod config;
mod http;
mod message;
mod openai;
mod provider;
mod request;
mod response;
#[cfg(feature = "testing")]
mod scripted;
mod stream;
