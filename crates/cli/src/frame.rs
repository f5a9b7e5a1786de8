//! Stdout framing protocol.
//!
//! One turn is written as
//!
//! ```text
//! STX (token US)* ETX GS summary RS buffer-json EOT
//! ```
//!
//! where the markers are single ASCII control bytes. Nothing else is ever
//! written to the framed stream.

use anyhow::Result;
use chain::Callback;
use std::io::Write;

/// Framing protocol revision
pub const PROTOCOL_VERSION: u32 = 3;

/// Start of a token stream
pub const STX: u8 = 0x02;

/// End of a token stream
pub const ETX: u8 = 0x03;

/// End of transmission for the turn
pub const EOT: u8 = 0x04;

/// End of all responses of the turn, the summary follows
pub const GS: u8 = 0x1D;

/// End of the summary, the buffer follows
pub const RS: u8 = 0x1E;

/// End of a token
pub const US: u8 = 0x1F;

/// Writes a turn to `W` using the framing protocol
pub struct Framer<W: Write> {
    out: W,
}

impl<W: Write> Framer<W> {
    /// Frame into `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Close the turn with the updated memory state
    pub fn finish(&mut self, summary: &str, buffer: &str) -> Result<()> {
        self.out.write_all(&[GS])?;
        self.out.write_all(summary.as_bytes())?;
        self.out.write_all(&[RS])?;
        self.out.write_all(buffer.as_bytes())?;
        self.out.write_all(&[EOT])?;
        self.out.flush()?;
        Ok(())
    }

    /// Get the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Take back the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Callback for Framer<W> {
    fn on_start(&mut self) -> Result<()> {
        self.out.write_all(&[STX])?;
        self.out.flush()?;
        Ok(())
    }

    fn on_token(&mut self, token: &str) -> Result<()> {
        self.out.write_all(token.as_bytes())?;
        self.out.write_all(&[US])?;
        self.out.flush()?;
        Ok(())
    }

    fn on_end(&mut self) -> Result<()> {
        self.out.write_all(&[ETX])?;
        self.out.flush()?;
        Ok(())
    }
}
