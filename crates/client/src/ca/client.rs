//! HTTP client for the certificate authority.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use smsgate_common::CsrRequestId;

use super::types::{CsrStatusResponse, PostCsrRequest};
use crate::errors::ClientError;
use crate::http;

/// Public endpoint of the SMSGate certificate authority.
pub const DEFAULT_CA_ENDPOINT: &str = "https://ca.sms-gate.app/api/v1";

/// Operations the issuance workflow needs from a CA.
#[async_trait]
pub trait CaApi: Send + Sync {
    /// Submit a CSR. The CA may issue immediately or assign a request ID
    /// to poll.
    async fn submit_csr(&self, request: &PostCsrRequest)
        -> Result<CsrStatusResponse, ClientError>;

    /// Query the state of a previously submitted CSR.
    async fn csr_status(&self, id: &CsrRequestId) -> Result<CsrStatusResponse, ClientError>;
}

/// Certificate authority client
#[derive(Debug, Clone)]
pub struct CaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CaClient {
    /// Create a client for `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the endpoint is not an
    /// absolute http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        let base_url = http::parse_endpoint(endpoint)?;
        debug!(endpoint = %base_url, "Creating CA client");

        Ok(Self {
            http: http::build_http_client()?,
            base_url,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl CaApi for CaClient {
    async fn submit_csr(
        &self,
        request: &PostCsrRequest,
    ) -> Result<CsrStatusResponse, ClientError> {
        let url = http::join(&self.base_url, &["csr"])?;
        debug!(csr_type = %request.csr_type, "Submitting CSR");

        let response = self.http.post(url).json(request).send().await?;
        http::read_json(response).await
    }

    async fn csr_status(&self, id: &CsrRequestId) -> Result<CsrStatusResponse, ClientError> {
        let url = http::join(&self.base_url, &["csr", id.as_str()])?;
        debug!(request_id = %id, "Polling CSR status");

        let response = self.http.get(url).send().await?;
        http::read_json(response).await
    }
}
