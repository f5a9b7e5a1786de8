//! Hooks invoked while a response streams in

use anyhow::Result;

/// Receives the lifecycle of one streamed response.
///
/// Hooks run synchronously on the task driving the conversation, in the
/// order `on_start`, `on_token`*, `on_end`.
pub trait Callback {
    /// The model started answering
    fn on_start(&mut self) -> Result<()> {
        Ok(())
    }

    /// A new token arrived
    fn on_token(&mut self, token: &str) -> Result<()>;

    /// The model finished answering
    fn on_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards every token
impl Callback for () {
    fn on_token(&mut self, _token: &str) -> Result<()> {
        Ok(())
    }
}

impl<C: Callback + ?Sized> Callback for &mut C {
    fn on_start(&mut self) -> Result<()> {
        (**self).on_start()
    }

    fn on_token(&mut self, token: &str) -> Result<()> {
        (**self).on_token(token)
    }

    fn on_end(&mut self) -> Result<()> {
        (**self).on_end()
    }
}
