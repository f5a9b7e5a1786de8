//! Configuration for a chat

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Chat configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct General {
    /// The model to use
    pub model: CompactString,

    /// Sampling temperature, the provider default when `None`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// The number of max tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<usize>,

    /// Whether to return the usage information in stream mode
    #[serde(default)]
    pub usage: bool,
}

impl General {
    /// Create a new configuration
    pub fn new(model: impl Into<CompactString>) -> Self {
        Self {
            model: model.into(),
            temperature: None,
            max_tokens: None,
            usage: false,
        }
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the generation limit
    pub fn max_tokens(mut self, tokens: usize) -> Self {
        self.max_tokens = Some(tokens);
        self
    }
}

impl Default for General {
    fn default() -> Self {
        Self::new("gpt-3.5-turbo")
    }
}
