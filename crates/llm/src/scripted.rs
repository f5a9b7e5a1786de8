//! Scripted LLM provider for testing.
//!
//! Implements [`LLM`] by replaying queued replies instead of calling a
//! model. Streamed replies are split into word-sized tokens. Every request
//! is recorded so tests can assert on the prompts that were sent.

use crate::{
    Choice, CompletionMeta, Delta, FinishReason, LLM, Request, Response, Role, StreamChunk,
};
use anyhow::Result;
use futures_core::Stream;
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

/// A provider that answers from a queue of canned replies.
///
/// Clones share the same queue and request log.
#[derive(Clone, Default)]
pub struct Scripted {
    replies: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl Scripted {
    /// Create a provider that answers with `replies` in order.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().map(Into::into).collect())),
            requests: Arc::default(),
        }
    }

    /// All requests received so far, oldest first.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Number of replies not consumed yet.
    pub fn remaining(&self) -> usize {
        self.replies.lock().len()
    }

    /// Split a reply into the tokens a streaming call yields.
    pub fn tokens(reply: &str) -> Vec<&str> {
        reply.split_inclusive(' ').collect()
    }

    fn next(&self, request: Request) -> Result<String> {
        self.requests.lock().push(request);
        self.replies
            .lock()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("scripted provider has no replies left"))
    }
}

impl LLM for Scripted {
    async fn send(&self, request: &Request) -> Result<Response> {
        let reply = self.next(request.clone())?;
        Ok(Response {
            meta: CompletionMeta {
                model: request.model.to_string(),
                ..Default::default()
            },
            choices: vec![Choice {
                index: 0,
                message: Delta {
                    role: Some(Role::Assistant),
                    content: Some(reply),
                },
                finish_reason: Some(FinishReason::Stop),
            }],
            usage: None,
        })
    }

    fn stream(&self, request: Request) -> impl Stream<Item = Result<StreamChunk>> + Send {
        let reply = self.next(request);
        async_stream::try_stream! {
            let reply = reply?;
            for token in Scripted::tokens(&reply) {
                yield StreamChunk::text(token);
            }
            yield StreamChunk::finish(FinishReason::Stop);
        }
    }
}
