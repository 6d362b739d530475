//! Client error types.

use thiserror::Error;

/// Errors raised while talking to the gateway or the CA.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status code {status} with body {body}")]
    Status { status: u16, body: String },

    #[error("Invalid endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// HTTP status returned by the server, if the call got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Request validation failures, detected before any network call.
///
/// The messages are user-facing and are printed verbatim by the CLI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Phone numbers are empty")]
    NoPhoneNumbers,

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Text and data content are mutually exclusive")]
    ConflictingPayload,

    #[error("SIM card index must be between 0 and 255 (0 for default)")]
    SimNumberOutOfRange(i64),

    #[error("Priority must be between {min} and {max}")]
    PriorityOutOfRange { value: i64, min: i8, max: i8 },

    #[error("TTL and Valid Until flags are mutually exclusive")]
    ConflictingExpiry,

    #[error("Valid Until must be in the future")]
    ValidUntilInPast,

    #[error("Data port must be between 1 and 65535")]
    DataPortOutOfRange(u64),

    #[error("Invalid base64 data")]
    InvalidBase64,

    #[error("URL is empty")]
    EmptyUrl,

    #[error("invalid URL")]
    InvalidUrl(String),

    #[error("Invalid event")]
    InvalidEvent(String),
}
