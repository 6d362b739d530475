//! Type-safe identifier newtypes for SMSGate resources.
//!
//! These types keep message, webhook and certificate-request identifiers
//! apart at compile time (e.g., passing a WebhookId where a MessageId is
//! expected). All of them serialize as plain JSON strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Message identifier.
///
/// Either chosen by the caller when sending or assigned by the gateway.
/// An empty identifier means "let the gateway decide".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Webhook identifier.
///
/// Webhooks registered with an existing identifier replace the previous
/// registration on the gateway side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WebhookId(String);

impl WebhookId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WebhookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WebhookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Certificate signing request identifier, assigned by the CA on submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CsrRequestId(String);

impl CsrRequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CsrRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_id() {
        let id = MessageId::new("msg-1");
        assert_eq!(id.as_str(), "msg-1");
        assert_eq!(id.to_string(), "msg-1");
        assert!(MessageId::default().is_empty());
    }

    #[test]
    fn test_webhook_id() {
        let id = WebhookId::from("wh-1");
        assert_eq!(id.as_str(), "wh-1");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_ids_serialize_as_strings() {
        let id = CsrRequestId::new("req-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"req-42\"");

        let parsed: WebhookId = serde_json::from_str("\"wh-9\"").unwrap();
        assert_eq!(parsed, WebhookId::new("wh-9"));
    }
}
