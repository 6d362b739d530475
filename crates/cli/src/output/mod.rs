//! Rendering of gateway responses.
//!
//! Every command hands its result to a [`Renderer`] chosen by `--format`
//! and prints whatever comes back. An empty string means "print nothing".

mod json;
mod text;

use clap::ValueEnum;
use smsgate_client::{MessageState, Webhook};

use crate::errors::CliError;

pub use json::JsonRenderer;
pub use text::TextRenderer;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// Compact JSON
    Raw,
}

impl Format {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            Self::Text => Box::new(TextRenderer::new()),
            Self::Json => Box::new(JsonRenderer::pretty()),
            Self::Raw => Box::new(JsonRenderer::compact()),
        }
    }
}

/// Formats command results for stdout.
pub trait Renderer: Send + Sync {
    fn message_state(&self, state: &MessageState) -> Result<String, CliError>;

    fn webhook(&self, webhook: &Webhook) -> Result<String, CliError>;

    fn webhooks(&self, webhooks: &[Webhook]) -> Result<String, CliError>;

    /// Confirmation for commands without a response body.
    fn success(&self) -> Result<String, CliError>;
}
