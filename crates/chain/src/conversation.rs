//! Conversation driver

use crate::{Callback, SummaryBufferMemory, Template, TemplateError};
use anyhow::Result;
use futures_util::StreamExt;
use llm::{FinishReason, General, LLM, Message, Request, Role};

/// Placeholders filled on every turn
const INPUTS: [&str; 2] = ["history", "input"];

/// A conversation with a model that remembers previous turns
pub struct Conversation<P: LLM> {
    provider: P,
    general: General,
    prompt: Template,
    memory: SummaryBufferMemory,
}

impl<P: LLM> Conversation<P> {
    /// Create a conversation.
    ///
    /// The prompt must contain `{history}` and `{input}`; any other
    /// placeholder must already be bound with [`Template::partial`].
    pub fn new(
        provider: P,
        general: General,
        prompt: Template,
        memory: SummaryBufferMemory,
    ) -> Result<Self> {
        if let Some(name) = INPUTS.iter().find(|name| !prompt.contains(name)) {
            return Err(TemplateError::Required((*name).to_owned()).into());
        }
        if let Some(name) = prompt.variables().into_iter().find(|v| !INPUTS.contains(v)) {
            return Err(TemplateError::Unknown(name.to_owned()).into());
        }

        Ok(Self {
            provider,
            general,
            prompt,
            memory,
        })
    }

    /// The conversation memory
    pub fn memory(&self) -> &SummaryBufferMemory {
        &self.memory
    }

    /// Send `input` to the model, streaming the reply through `callback`,
    /// and record the turn in memory. Returns the full reply.
    pub async fn predict<C: Callback>(&mut self, input: &str, mut callback: C) -> Result<String> {
        let history = self.memory.history();
        let prompt = self
            .prompt
            .format(&[("history", history.as_str()), ("input", input)])?;
        tracing::trace!("prompt: {prompt}");

        let request = Request::from(&self.general)
            .with_messages(vec![Message::user(prompt)])
            .stream(self.general.usage);

        let mut builder = Message::builder(Role::Assistant);
        callback.on_start()?;
        {
            let stream = self.provider.stream(request);
            futures_util::pin_mut!(stream);
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                if let Some(token) = builder.accept(&chunk) {
                    callback.on_token(token)?;
                }

                match chunk.reason() {
                    None | Some(FinishReason::Stop | FinishReason::Other) => {}
                    Some(reason) => tracing::warn!("response ended early: {reason:?}"),
                }
                if let Some(usage) = chunk.usage {
                    tracing::debug!("usage: {usage:?}");
                }
            }
        }
        callback.on_end()?;

        let output = builder.build().content;
        tracing::debug!("reply of {} bytes", output.len());
        self.memory
            .save_context(input, &output, &self.provider)
            .await?;
        Ok(output)
    }
}
