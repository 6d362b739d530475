use serde::Serialize;
use smsgate_client::{MessageState, Webhook};

use super::Renderer;
use crate::errors::CliError;

/// JSON output, either pretty-printed (`json`) or compact (`raw`).
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, CliError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.map_err(|e| CliError::output(format!("failed to marshal: {e}")))
    }
}

impl Renderer for JsonRenderer {
    fn message_state(&self, state: &MessageState) -> Result<String, CliError> {
        self.encode(state)
    }

    fn webhook(&self, webhook: &Webhook) -> Result<String, CliError> {
        self.encode(webhook)
    }

    fn webhooks(&self, webhooks: &[Webhook]) -> Result<String, CliError> {
        self.encode(webhooks)
    }

    fn success(&self) -> Result<String, CliError> {
        Ok(String::new())
    }
}
