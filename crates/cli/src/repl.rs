//! Line-driven REPL writing framed replies.

use crate::frame::Framer;
use anyhow::Result;
use chain::Conversation;
use chrono::{DateTime, Utc};
use llm::LLM;
use std::{io::Write, pin::pin};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Reads one user message per line and answers each with a framed turn.
pub struct Repl<P: LLM, W: Write> {
    conversation: Conversation<P>,
    framer: Framer<W>,
    timestamp: bool,
}

impl<P: LLM, W: Write> Repl<P, W> {
    /// Create a REPL writing frames to `out`.
    pub fn new(conversation: Conversation<P>, out: W) -> Self {
        Self {
            conversation,
            framer: Framer::new(out),
            timestamp: true,
        }
    }

    /// Whether to prefix each input with the time it was read
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = enabled;
        self
    }

    /// The conversation driven by this REPL
    pub fn conversation(&self) -> &Conversation<P> {
        &self.conversation
    }

    /// Get the framed output
    pub fn output(&self) -> &W {
        self.framer.get_ref()
    }

    /// Answer lines from `input` until it ends or `shutdown` resolves.
    ///
    /// `shutdown` is only observed while waiting for input, so a turn that
    /// has started always runs to its end-of-transmission marker.
    pub async fn run<R>(&mut self, input: R, shutdown: impl Future<Output = ()>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut shutdown = pin!(shutdown);

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                _ = &mut shutdown => {
                    tracing::info!("interrupted, exiting");
                    break;
                }
            };

            let Some(line) = line else {
                tracing::info!("end of input, exiting");
                break;
            };
            self.turn(&line).await?;
        }

        Ok(())
    }

    /// Answer one line of input and close the turn.
    pub async fn turn(&mut self, line: &str) -> Result<()> {
        let input = if self.timestamp {
            stamp(Utc::now(), line)
        } else {
            line.to_owned()
        };

        tracing::debug!("turn: {input}");
        self.conversation.predict(&input, &mut self.framer).await?;

        let memory = self.conversation.memory();
        self.framer.finish(memory.summary(), &memory.to_json()?)
    }
}

/// Prefix `line` with `now` as `[YYYY-MM-DDTHH:MM:SSZ] `.
pub fn stamp(now: DateTime<Utc>, line: &str) -> String {
    format!("[{}] {line}", now.format("%Y-%m-%dT%H:%M:%SZ"))
}
