//! Persona CLI
//!
//! Plays a character over stdin/stdout: each input line is answered by the
//! model, streamed to stdout in the framing described in [`frame`], followed
//! by the updated conversation memory.

use anyhow::Result;
use chain::Conversation;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};
pub use {
    config::Config,
    frame::{Framer, PROTOCOL_VERSION},
    repl::Repl,
};

pub mod config;
pub mod frame;
pub mod repl;

/// Persona CLI
#[derive(Debug, Parser)]
#[command(name = "persona", version, about)]
pub struct App {
    /// Configuration as one JSON object, e.g. '{"synopsis": "..."}'
    #[arg(required_unless_present = "protocol")]
    pub config: Option<String>,

    /// Print the framing protocol version and exit
    #[arg(long)]
    pub protocol: bool,

    /// Verbosity level (use -v, -vv, -vvv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl App {
    /// Initialize tracing subscriber based on verbosity.
    ///
    /// Logs go to stderr, stdout carries the framed protocol only.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let directive = match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "persona=debug,persona_chain=debug,persona_llm=debug",
                3 => "debug",
                _ => "trace",
            };
            EnvFilter::new(directive)
        });

        fmt()
            .without_time()
            .with_env_filter(filter)
            .with_target(self.verbose != 0)
            .with_writer(std::io::stderr)
            .init();
    }

    /// Run the REPL on stdin/stdout until interrupted or stdin closes.
    pub async fn run(&self) -> Result<()> {
        if self.protocol {
            println!("{PROTOCOL_VERSION}");
            return Ok(());
        }

        let json = self
            .config
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("missing configuration argument"))?;
        let config = Config::parse(json)?;
        tracing::info!(
            "starting persona with {}, protocol v{PROTOCOL_VERSION}, {} buffered messages",
            config.model,
            config.buffer.len()
        );

        let conversation = Conversation::new(
            config.provider()?,
            config.general(),
            config.prompt()?,
            config.memory()?,
        )?;
        let mut repl = Repl::new(conversation, std::io::stdout()).timestamp(config.timestamp);
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        repl.run(stdin, interrupted()).await
    }
}

/// Resolves on Ctrl-C, never if the handler cannot be installed.
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
