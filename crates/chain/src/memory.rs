//! Conversation memory: recent turns verbatim plus a running summary.
//!
//! Turns are kept in the buffer until its estimated size crosses the token
//! limit. The oldest messages are then evicted and folded into the summary
//! by asking the model to rewrite it.

use crate::{Record, Template, prompt};
use anyhow::Result;
use llm::{General, LLM, Message, Request, Role, estimate_tokens};

/// Token limit used when none is configured
pub const DEFAULT_MAX_TOKEN_LIMIT: usize = 2000;

/// Recent messages plus a model-written summary of older ones
#[derive(Debug, Clone)]
pub struct SummaryBufferMemory {
    buffer: Vec<Message>,
    summary: String,
    max_token_limit: usize,
    summarizer: Template,
    general: General,
}

impl SummaryBufferMemory {
    /// Create an empty memory that summarizes with `general` and the
    /// `summarizer` prompt.
    pub fn new(general: General, summarizer: Template) -> Result<Self> {
        summarizer.validate(prompt::SUMMARIZER_REQUIRED, &[])?;
        Ok(Self {
            buffer: Vec::new(),
            summary: String::new(),
            max_token_limit: DEFAULT_MAX_TOKEN_LIMIT,
            summarizer,
            general,
        })
    }

    /// Set the token limit of the buffer
    pub fn with_limit(mut self, max_token_limit: usize) -> Self {
        self.max_token_limit = max_token_limit;
        self
    }

    /// Seed the running summary
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Seed the buffer
    pub fn with_buffer(mut self, buffer: impl IntoIterator<Item = Message>) -> Self {
        self.buffer = buffer.into_iter().collect();
        self
    }

    /// The buffered messages, oldest first
    pub fn buffer(&self) -> &[Message] {
        &self.buffer
    }

    /// The running summary
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The token limit of the buffer
    pub fn max_token_limit(&self) -> usize {
        self.max_token_limit
    }

    /// Render the summary and buffer as prompt text
    pub fn history(&self) -> String {
        let mut lines = Vec::with_capacity(self.buffer.len() + 1);
        if !self.summary.is_empty() {
            lines.push(line(Role::System, &self.summary));
        }
        lines.extend(self.buffer.iter().map(|m| line(m.role, &m.content)));
        lines.join("\n")
    }

    /// The buffer in its serialized record form
    pub fn records(&self) -> Vec<Record> {
        self.buffer.iter().map(Record::from).collect()
    }

    /// The buffer as a JSON array of records
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.records()).map_err(Into::into)
    }

    /// Store a finished turn, then summarize if the buffer grew too large
    pub async fn save_context<P: LLM>(
        &mut self,
        input: &str,
        output: &str,
        provider: &P,
    ) -> Result<()> {
        self.buffer.push(Message::user(input));
        self.buffer.push(Message::assistant(output));
        self.prune(provider).await
    }

    /// Evict the oldest messages until the buffer fits the token limit and
    /// fold them into the summary.
    pub async fn prune<P: LLM>(&mut self, provider: &P) -> Result<()> {
        let mut pruned = Vec::new();
        while !self.buffer.is_empty() && estimate_tokens(&self.buffer) > self.max_token_limit {
            pruned.push(self.buffer.remove(0));
        }

        if pruned.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            "evicting {} messages, {} kept in buffer",
            pruned.len(),
            self.buffer.len()
        );
        self.summary = self.predict_new_summary(&pruned, provider).await?;
        Ok(())
    }

    /// Ask the model for a summary covering the current one plus `messages`
    pub async fn predict_new_summary<P: LLM>(
        &self,
        messages: &[Message],
        provider: &P,
    ) -> Result<String> {
        let new_lines = messages
            .iter()
            .map(|m| line(m.role, &m.content))
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = self.summarizer.format(&[
            ("summary", self.summary.as_str()),
            ("new_lines", new_lines.as_str()),
        ])?;

        let request = Request::from(&self.general).with_messages(vec![Message::user(prompt)]);
        let response = provider.send(&request).await?;
        let summary = response
            .content()
            .ok_or_else(|| anyhow::anyhow!("summarizer returned no content"))?;
        tracing::trace!("summary: {summary}");
        Ok(summary.trim().to_owned())
    }
}

fn line(role: Role, content: &str) -> String {
    let prefix = match role {
        Role::User => "Human",
        Role::Assistant => "AI",
        Role::System => "System",
    };
    format!("{prefix}: {content}")
}
