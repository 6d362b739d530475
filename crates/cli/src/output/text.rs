use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset, Local, Utc};
use smsgate_client::{MessageState, Webhook};

use super::Renderer;
use crate::errors::CliError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable output.
///
/// State timestamps are shown in local time unless a fixed offset is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    offset: Option<FixedOffset>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render timestamps at a fixed UTC offset instead of local time.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = Some(offset);
        self
    }

    fn timestamp(&self, at: &DateTime<Utc>) -> String {
        match self.offset {
            Some(offset) => at.with_timezone(&offset).format(TIMESTAMP_FORMAT).to_string(),
            None => at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    fn write_webhook(out: &mut String, webhook: &Webhook) {
        let _ = write!(
            out,
            "ID: {}\nURL: {}\nEvent: {}",
            webhook.id, webhook.url, webhook.event
        );
        if let Some(device_id) = &webhook.device_id {
            let _ = write!(out, "\nDevice ID: {device_id}");
        }
    }
}

impl Renderer for TextRenderer {
    fn message_state(&self, state: &MessageState) -> Result<String, CliError> {
        let mut out = String::new();
        let _ = write!(
            out,
            "ID: {}\nState: {}\nIsHashed: {}\nIsEncrypted: {}",
            state.id, state.state, state.is_hashed, state.is_encrypted
        );

        // BTreeMap iteration follows the lifecycle order of ProcessingState.
        if !state.states.is_empty() {
            out.push_str("\nStates:");
            for (name, at) in &state.states {
                let _ = write!(out, "\n\t{name}\t{}", self.timestamp(at));
            }
        }

        out.push_str("\nRecipients:");
        for recipient in &state.recipients {
            let _ = write!(
                out,
                "\n\t{}\t{}\t{}",
                recipient.phone_number,
                recipient.state,
                recipient.error.as_deref().unwrap_or_default()
            );
        }

        Ok(out)
    }

    fn webhook(&self, webhook: &Webhook) -> Result<String, CliError> {
        let mut out = String::new();
        Self::write_webhook(&mut out, webhook);
        Ok(out)
    }

    fn webhooks(&self, webhooks: &[Webhook]) -> Result<String, CliError> {
        if webhooks.is_empty() {
            return Ok("No webhooks".to_string());
        }

        let mut out = String::new();
        for (i, webhook) in webhooks.iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            Self::write_webhook(&mut out, webhook);
        }
        Ok(out)
    }

    fn success(&self) -> Result<String, CliError> {
        Ok("Success".to_string())
    }
}
