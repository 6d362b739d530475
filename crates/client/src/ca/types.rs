//! CA wire types.

use std::fmt;

use serde::{Deserialize, Serialize};
use smsgate_common::CsrRequestId;

/// What the issued certificate will be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsrType {
    /// TLS for a local endpoint receiving gateway webhooks.
    Webhook,
    /// TLS for a self-hosted private gateway server.
    PrivateServer,
}

impl fmt::Display for CsrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Webhook => "webhook",
            Self::PrivateServer => "private_server",
        })
    }
}

/// CSR submission body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostCsrRequest {
    #[serde(rename = "type")]
    pub csr_type: CsrType,
    /// PEM-encoded certificate signing request.
    pub content: String,
}

/// Review state reported by the CA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsrStatus {
    Pending,
    Approved,
    Denied,
    #[serde(other)]
    Unknown,
}

/// Response to both submission and status queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrStatusResponse {
    #[serde(alias = "request_id")]
    pub request_id: CsrRequestId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CsrStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
}

impl CsrStatusResponse {
    /// The issued certificate, if any. Blank values count as "not yet".
    pub fn certificate(&self) -> Option<&str> {
        self.certificate
            .as_deref()
            .filter(|pem| !pem.trim().is_empty())
    }

    pub fn is_denied(&self) -> bool {
        self.status == Some(CsrStatus::Denied)
    }
}
