//! Serialized form of buffered messages.
//!
//! Each message is stored as `{"type": "human", "data": {"content": ...}}`
//! so that state captured by the caller can be handed back verbatim on the
//! next start.

use llm::{Message, Role};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A buffered message as exchanged with the caller
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum Record {
    /// A message from the human
    Human(Body),
    /// A reply from the model
    Ai(Body),
    /// A system message
    System(Body),
}

/// Payload of a [`Record`]
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Body {
    /// The message text
    pub content: String,

    /// Provider-specific extras, kept for round-tripping
    #[serde(default)]
    pub additional_kwargs: Map<String, Value>,
}

impl From<&Message> for Record {
    fn from(message: &Message) -> Self {
        let body = Body {
            content: message.content.clone(),
            additional_kwargs: Map::new(),
        };
        match message.role {
            Role::User => Self::Human(body),
            Role::Assistant => Self::Ai(body),
            Role::System => Self::System(body),
        }
    }
}

impl From<Record> for Message {
    fn from(record: Record) -> Self {
        match record {
            Record::Human(body) => Message::user(body.content),
            Record::Ai(body) => Message::assistant(body.content),
            Record::System(body) => Message::system(body.content),
        }
    }
}
