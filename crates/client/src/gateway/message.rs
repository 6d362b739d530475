//! Message request and state types.
//!
//! Field names follow the gateway's lower camel case wire format.

use std::collections::BTreeMap;
use std::time::Duration;

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smsgate_common::MessageId;

use crate::errors::ValidationError;

/// Lowest accepted priority.
pub const PRIORITY_MIN: i8 = i8::MIN;
/// Highest accepted priority. Values >= 100 bypass gateway limits and delays.
pub const PRIORITY_MAX: i8 = i8::MAX;
/// Destination port used for data messages when none is given.
pub const DEFAULT_DATA_PORT: u16 = 53739;

/// Message content: exactly one of text or binary data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessagePayload {
    TextMessage {
        text: String,
    },
    /// Base64-encoded data delivered to an application port.
    DataMessage {
        data: String,
        port: u16,
    },
}

/// Relative or absolute message expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
enum Expiry {
    /// Seconds to live after the gateway accepts the message.
    Ttl(u64),
    ValidUntil(DateTime<Utc>),
}

/// A validated outgoing message.
///
/// Only [`MessageBuilder::build`] produces values of this type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<MessageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device_id: Option<String>,
    phone_numbers: Vec<String>,
    #[serde(flatten)]
    payload: MessagePayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    sim_number: Option<u8>,
    with_delivery_report: bool,
    #[serde(skip_serializing_if = "is_default_priority")]
    priority: i8,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    expiry: Option<Expiry>,
}

fn is_default_priority(priority: &i8) -> bool {
    *priority == 0
}

impl Message {
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    pub fn id(&self) -> Option<&MessageId> {
        self.id.as_ref()
    }

    pub fn phone_numbers(&self) -> &[String] {
        &self.phone_numbers
    }

    pub fn payload(&self) -> &MessagePayload {
        &self.payload
    }

    pub fn priority(&self) -> i8 {
        self.priority
    }

    pub fn sim_number(&self) -> Option<u8> {
        self.sim_number
    }

    pub fn ttl(&self) -> Option<u64> {
        match self.expiry {
            Some(Expiry::Ttl(secs)) => Some(secs),
            _ => None,
        }
    }

    pub fn valid_until(&self) -> Option<DateTime<Utc>> {
        match self.expiry {
            Some(Expiry::ValidUntil(at)) => Some(at),
            _ => None,
        }
    }
}

/// Collects raw user input and checks every message invariant in
/// [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    id: Option<String>,
    device_id: Option<String>,
    phone_numbers: Vec<String>,
    text: Option<String>,
    data: Option<(String, u64)>,
    sim_number: i64,
    delivery_report: bool,
    priority: i64,
    ttl: Option<Duration>,
    valid_until: Option<DateTime<Utc>>,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self {
            id: None,
            device_id: None,
            phone_numbers: Vec::new(),
            text: None,
            data: None,
            sim_number: 0,
            delivery_report: true,
            priority: 0,
            ttl: None,
            valid_until: None,
        }
    }
}

impl MessageBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn phone_numbers<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phone_numbers.extend(phones.into_iter().map(Into::into));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Base64 content for a data message sent to `port`.
    pub fn data(mut self, data: impl Into<String>, port: u64) -> Self {
        self.data = Some((data.into(), port));
        self
    }

    /// One-based SIM index; 0 leaves the choice to the device settings.
    pub fn sim_number(mut self, sim_number: i64) -> Self {
        self.sim_number = sim_number;
        self
    }

    pub fn delivery_report(mut self, enabled: bool) -> Self {
        self.delivery_report = enabled;
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn valid_until(mut self, valid_until: DateTime<Utc>) -> Self {
        self.valid_until = Some(valid_until);
        self
    }

    pub fn build(self) -> Result<Message, ValidationError> {
        let sim_number = u8::try_from(self.sim_number)
            .map_err(|_| ValidationError::SimNumberOutOfRange(self.sim_number))?;

        // Any non-zero TTL conflicts with a deadline, even one that rounds
        // down to zero seconds below.
        let ttl = self.ttl.filter(|d| !d.is_zero());
        let expiry = match (ttl, self.valid_until) {
            (Some(_), Some(_)) => return Err(ValidationError::ConflictingExpiry),
            (Some(d), None) if d.as_secs() == 0 => None,
            (Some(d), None) => Some(Expiry::Ttl(d.as_secs())),
            (None, Some(at)) if at <= Utc::now() => return Err(ValidationError::ValidUntilInPast),
            (None, Some(at)) => Some(Expiry::ValidUntil(at)),
            (None, None) => None,
        };

        let priority =
            i8::try_from(self.priority).map_err(|_| ValidationError::PriorityOutOfRange {
                value: self.priority,
                min: PRIORITY_MIN,
                max: PRIORITY_MAX,
            })?;

        let payload = match (self.text, self.data) {
            (Some(_), Some(_)) => return Err(ValidationError::ConflictingPayload),
            (None, None) => return Err(ValidationError::EmptyMessage),
            (Some(text), None) => {
                if text.trim().is_empty() {
                    return Err(ValidationError::EmptyMessage);
                }
                MessagePayload::TextMessage { text }
            }
            (None, Some((data, port))) => {
                let port = u16::try_from(port)
                    .ok()
                    .filter(|p| *p >= 1)
                    .ok_or(ValidationError::DataPortOutOfRange(port))?;
                let data = data.trim().to_string();
                if data.is_empty() {
                    return Err(ValidationError::EmptyMessage);
                }
                if !is_base64(&data) {
                    return Err(ValidationError::InvalidBase64);
                }
                MessagePayload::DataMessage { data, port }
            }
        };

        let phone_numbers: Vec<String> = self
            .phone_numbers
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if phone_numbers.is_empty() {
            return Err(ValidationError::NoPhoneNumbers);
        }

        Ok(Message {
            id: self.id.filter(|id| !id.is_empty()).map(MessageId::new),
            device_id: self.device_id.filter(|id| !id.is_empty()),
            phone_numbers,
            payload,
            sim_number: (sim_number > 0).then_some(sim_number),
            with_delivery_report: self.delivery_report,
            priority,
            expiry,
        })
    }
}

fn is_base64(data: &str) -> bool {
    STANDARD.decode(data).is_ok() || STANDARD_NO_PAD.decode(data).is_ok()
}

/// Query options for sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub skip_phone_validation: bool,
    /// Only consider devices seen within this many hours.
    pub device_active_within: Option<u32>,
}

impl SendOptions {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if self.skip_phone_validation {
            query.push(("skipPhoneValidation", "true".to_string()));
        }
        if let Some(hours) = self.device_active_within.filter(|h| *h > 0) {
            query.push(("deviceActiveWithin", hours.to_string()));
        }
        query
    }
}

/// Processing state of a message or of one recipient.
///
/// Variant order is the canonical lifecycle order used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProcessingState {
    Pending,
    Processed,
    Sent,
    Delivered,
    Failed,
    #[serde(other)]
    Unknown,
}

impl ProcessingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processed => "Processed",
            Self::Sent => "Sent",
            Self::Delivered => "Delivered",
            Self::Failed => "Failed",
            Self::Unknown => "Unknown",
        }
    }
}

impl Default for ProcessingState {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery state for a single phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientState {
    pub phone_number: String,
    pub state: ProcessingState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Gateway view of a message, returned by send and status calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageState {
    pub id: MessageId,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub device_id: String,
    pub state: ProcessingState,
    pub is_hashed: bool,
    pub is_encrypted: bool,
    pub recipients: Vec<RecipientState>,
    /// When the message entered each state, ordered by lifecycle.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub states: BTreeMap<ProcessingState, DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn text_builder() -> MessageBuilder {
        Message::builder()
            .phone_numbers(["+12025550123"])
            .text("Hello")
    }

    #[test]
    fn test_text_message_wire_format() {
        let message = text_builder().build().unwrap();
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(
            value,
            json!({
                "phoneNumbers": ["+12025550123"],
                "textMessage": {"text": "Hello"},
                "withDeliveryReport": true,
            })
        );
    }

    #[test]
    fn test_data_message_wire_format() {
        let message = Message::builder()
            .id("msg-7")
            .device_id("device-123")
            .phone_numbers(["+12025550123", "+12025550124"])
            .data("SGVsbG8gV29ybGQh", 8080)
            .sim_number(1)
            .priority(100)
            .ttl(Duration::from_secs(90 * 60))
            .build()
            .unwrap();
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["id"], "msg-7");
        assert_eq!(value["deviceId"], "device-123");
        assert_eq!(value["dataMessage"]["data"], "SGVsbG8gV29ybGQh");
        assert_eq!(value["dataMessage"]["port"], 8080);
        assert_eq!(value["simNumber"], 1);
        assert_eq!(value["priority"], 100);
        assert_eq!(value["ttl"], 5400);
        assert!(value.get("textMessage").is_none());
        assert!(value.get("validUntil").is_none());
    }

    #[test]
    fn test_valid_until_wire_format() {
        let at = Utc::now() + chrono::Duration::hours(2);
        let message = text_builder().valid_until(at).build().unwrap();
        let value = serde_json::to_value(&message).unwrap();

        assert!(value.get("ttl").is_none());
        assert!(value["validUntil"].is_string());
        assert_eq!(message.valid_until(), Some(at));
    }

    #[test]
    fn test_ttl_and_valid_until_are_exclusive() {
        let err = text_builder()
            .ttl(Duration::from_secs(60))
            .valid_until(Utc::now() + chrono::Duration::hours(1))
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::ConflictingExpiry);
    }

    #[test]
    fn test_sub_second_ttl_still_conflicts_with_valid_until() {
        let err = text_builder()
            .ttl(Duration::from_millis(500))
            .valid_until(Utc::now() + chrono::Duration::hours(1))
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::ConflictingExpiry);

        let message = text_builder().ttl(Duration::from_millis(500)).build().unwrap();
        assert_eq!(message.ttl(), None);
    }

    #[test]
    fn test_valid_until_in_past() {
        let err = text_builder()
            .valid_until(Utc::now() - chrono::Duration::minutes(1))
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::ValidUntilInPast);
    }

    #[test]
    fn test_zero_ttl_is_unset() {
        let message = text_builder().ttl(Duration::ZERO).build().unwrap();
        assert_eq!(message.ttl(), None);
    }

    #[test]
    fn test_payload_exactly_one() {
        let neither = Message::builder().phone_numbers(["+1"]).build();
        assert_eq!(neither.unwrap_err(), ValidationError::EmptyMessage);

        let both = text_builder().data("SGVsbG8=", 53739).build();
        assert_eq!(both.unwrap_err(), ValidationError::ConflictingPayload);
    }

    #[test]
    fn test_empty_phone_list() {
        let err = Message::builder()
            .phone_numbers([" ", ""])
            .text("Hello")
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::NoPhoneNumbers);
    }

    #[test]
    fn test_invalid_base64() {
        let err = Message::builder()
            .phone_numbers(["+1"])
            .data("not-base64", u64::from(DEFAULT_DATA_PORT))
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidBase64);
        assert_eq!(err.to_string(), "Invalid base64 data");
    }

    #[test]
    fn test_unpadded_base64_accepted() {
        let message = Message::builder()
            .phone_numbers(["+1"])
            .data("SGVsbG8", 1)
            .build()
            .unwrap();
        assert!(matches!(
            message.payload(),
            MessagePayload::DataMessage { port: 1, .. }
        ));
    }

    #[test]
    fn test_data_port_bounds() {
        for port in [0, 65536, 99999] {
            let err = Message::builder()
                .phone_numbers(["+1"])
                .data("SGVsbG8=", port)
                .build()
                .unwrap_err();
            assert_eq!(err, ValidationError::DataPortOutOfRange(port));
        }
    }

    #[test]
    fn test_priority_error_message() {
        let err = text_builder().priority(9999).build().unwrap_err();
        assert_eq!(err.to_string(), "Priority must be between -128 and 127");
    }

    #[test]
    fn test_send_options_query() {
        assert!(SendOptions::default().query().is_empty());

        let options = SendOptions {
            skip_phone_validation: true,
            device_active_within: Some(12),
        };
        assert_eq!(
            options.query(),
            vec![
                ("skipPhoneValidation", "true".to_string()),
                ("deviceActiveWithin", "12".to_string()),
            ]
        );
    }

    #[test]
    fn test_message_state_lenient_decode() {
        let state: MessageState = serde_json::from_value(json!({
            "id": "msg-1",
            "state": "Pending",
            "createdAt": "2023-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(state.id.as_str(), "msg-1");
        assert_eq!(state.state, ProcessingState::Pending);
        assert!(state.recipients.is_empty());
    }

    #[test]
    fn test_message_state_orders_states_by_lifecycle() {
        let state: MessageState = serde_json::from_value(json!({
            "id": "msg-2",
            "state": "Delivered",
            "recipients": [{"phoneNumber": "+1", "state": "Delivered"}],
            "states": {
                "Delivered": "2024-05-01T10:00:03Z",
                "Pending": "2024-05-01T10:00:00Z",
                "Sent": "2024-05-01T10:00:02Z",
                "Processed": "2024-05-01T10:00:01Z"
            }
        }))
        .unwrap();

        let order: Vec<_> = state.states.keys().copied().collect();
        assert_eq!(
            order,
            vec![
                ProcessingState::Pending,
                ProcessingState::Processed,
                ProcessingState::Sent,
                ProcessingState::Delivered,
            ]
        );
    }

    #[test]
    fn test_unknown_state_decodes() {
        let state: MessageState =
            serde_json::from_value(json!({"id": "x", "state": "Archived"})).unwrap();
        assert_eq!(state.state, ProcessingState::Unknown);
    }

    proptest! {
        #[test]
        fn prop_priority_range(priority in -1000i64..1000) {
            let result = text_builder().priority(priority).build();
            prop_assert_eq!(result.is_ok(), (-128..=127).contains(&priority));
        }

        #[test]
        fn prop_sim_number_range(sim in -10i64..300) {
            let result = text_builder().sim_number(sim).build();
            match result {
                Ok(message) => {
                    prop_assert!((0..=255).contains(&sim));
                    prop_assert_eq!(message.sim_number().is_some(), sim > 0);
                }
                Err(err) => prop_assert_eq!(err, ValidationError::SimNumberOutOfRange(sim)),
            }
        }
    }
}
