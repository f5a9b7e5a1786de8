//! Start-up configuration passed as a single JSON argument

use anyhow::{Context, Result};
use chain::{Record, SummaryBufferMemory, Template, prompt};
use llm::{Client, General, Message, OpenAI};
use serde::Deserialize;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "OPENAI_API_BASE";

/// Configuration of one REPL process
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// The character the model plays
    pub synopsis: String,

    /// The chat model
    #[serde(default = "default_model")]
    pub model: String,

    /// Persona prompt override
    #[serde(default)]
    pub template: Option<String>,

    /// Summarizer prompt override
    #[serde(default)]
    pub summarizer_template: Option<String>,

    /// Summary carried over from a previous process
    #[serde(default)]
    pub moving_summary_buffer: String,

    /// Buffered turns carried over from a previous process
    #[serde(default)]
    pub buffer: Vec<Record>,

    /// Sampling temperature of replies
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Buffer size, in estimated tokens, that triggers summarization
    #[serde(default = "default_max_token_limit")]
    pub max_token_limit: usize,

    /// Whether to prefix each input line with the time it was read
    #[serde(default = "default_timestamp")]
    pub timestamp: bool,

    /// Chat completions endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Parse and validate the JSON argument
    pub fn parse(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).context("invalid configuration")?;
        config.prompt().context("invalid template")?;
        config.summarizer().context("invalid summarizer_template")?;
        Ok(config)
    }

    /// The persona prompt with the synopsis bound
    pub fn prompt(&self) -> Result<Template> {
        let template = Template::new(self.template.as_deref().unwrap_or(prompt::PERSONA))?;
        template.validate(prompt::PERSONA_REQUIRED, prompt::PERSONA_OPTIONAL)?;
        Ok(template.partial("synopsis", self.synopsis.as_str()))
    }

    /// The summarizer prompt
    pub fn summarizer(&self) -> Result<Template> {
        let template = Template::new(
            self.summarizer_template
                .as_deref()
                .unwrap_or(prompt::SUMMARIZER),
        )?;
        template.validate(prompt::SUMMARIZER_REQUIRED, &[])?;
        Ok(template)
    }

    /// Chat configuration for replies
    pub fn general(&self) -> General {
        General::new(self.model.as_str()).temperature(self.temperature)
    }

    /// Memory seeded with the carried-over summary and buffer
    pub fn memory(&self) -> Result<SummaryBufferMemory> {
        let general = General::new(self.model.as_str());
        let memory = SummaryBufferMemory::new(general, self.summarizer()?)?
            .with_limit(self.max_token_limit)
            .with_summary(self.moving_summary_buffer.as_str())
            .with_buffer(self.buffer.iter().cloned().map(Message::from));
        Ok(memory)
    }

    /// The chat completions endpoint: the override, then the base URL from
    /// the environment, then OpenAI.
    pub fn endpoint(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.clone();
        }

        match std::env::var(API_BASE_ENV) {
            Ok(base) if !base.is_empty() => {
                format!("{}/chat/completions", base.trim_end_matches('/'))
            }
            _ => llm::ENDPOINT.to_owned(),
        }
    }

    /// The model provider, authenticated when an API key is set
    pub fn provider(&self) -> Result<OpenAI> {
        let key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        if key.is_none() {
            tracing::warn!("{API_KEY_ENV} is not set, sending unauthenticated requests");
        }
        OpenAI::custom(Client::new(), key.as_deref(), &self.endpoint())
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".into()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_max_token_limit() -> usize {
    40
}

fn default_timestamp() -> bool {
    true
}
