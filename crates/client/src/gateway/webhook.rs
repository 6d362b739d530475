//! Webhook subscription types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smsgate_common::WebhookId;
use url::Url;

use crate::errors::ValidationError;

/// Events a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WebhookEvent {
    SmsReceived,
    SmsDataReceived,
    MmsReceived,
    SmsSent,
    SmsDelivered,
    SmsFailed,
    SystemPing,
}

impl WebhookEvent {
    pub const ALL: [WebhookEvent; 7] = [
        Self::SmsReceived,
        Self::SmsDataReceived,
        Self::MmsReceived,
        Self::SmsSent,
        Self::SmsDelivered,
        Self::SmsFailed,
        Self::SystemPing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmsReceived => "sms:received",
            Self::SmsDataReceived => "sms:data-received",
            Self::MmsReceived => "mms:received",
            Self::SmsSent => "sms:sent",
            Self::SmsDelivered => "sms:delivered",
            Self::SmsFailed => "sms:failed",
            Self::SystemPing => "system:ping",
        }
    }
}

impl fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WebhookEvent {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|event| event.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidEvent(s.to_string()))
    }
}

/// A webhook subscription.
///
/// `event` stays a plain string on decode: the gateway may report event
/// kinds this client does not know about yet, and listing them must not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    #[serde(default, skip_serializing_if = "WebhookId::is_empty")]
    pub id: WebhookId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    pub url: String,
    pub event: String,
}

impl Webhook {
    /// Build a registration request.
    ///
    /// The URL must be an absolute `http` or `https` URL with a host. Without
    /// a device ID the webhook is account-wide.
    pub fn registration(
        id: Option<WebhookId>,
        url: &str,
        event: WebhookEvent,
        device_id: Option<String>,
    ) -> Result<Self, ValidationError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        let parsed = Url::parse(url).map_err(|_| ValidationError::InvalidUrl(url.to_string()))?;
        let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
        if !has_host || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidUrl(url.to_string()));
        }

        Ok(Self {
            id: id.unwrap_or_default(),
            device_id: device_id.filter(|d| !d.is_empty()),
            url: url.to_string(),
            event: event.as_str().to_string(),
        })
    }
}
