//! Prompt templating, summary-buffer memory and the conversation driver.
//!
//! A [`Conversation`] formats the persona prompt from the memory's history
//! and the user input, streams the reply through a [`Callback`], then stores
//! the turn in [`SummaryBufferMemory`], which folds old turns into a running
//! summary once the buffer outgrows its token limit.

pub use callback::Callback;
pub use conversation::Conversation;
pub use memory::{DEFAULT_MAX_TOKEN_LIMIT, SummaryBufferMemory};
pub use record::{Body, Record};
pub use template::{Template, TemplateError};

mod callback;
mod conversation;
mod memory;
pub mod prompt;
mod record;
mod template;
