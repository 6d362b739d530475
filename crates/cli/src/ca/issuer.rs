//! CSR submission and status polling.

use std::future::Future;
use std::time::Duration;

use smsgate_client::{CaApi, ClientError, CsrStatusResponse, PostCsrRequest};
use thiserror::Error;
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::CliError;

/// Delay between status checks.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Overall deadline when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why no certificate was issued.
#[derive(Error, Debug)]
pub enum IssueError {
    #[error("Timeout waiting for certificate")]
    TimedOut,

    #[error("Cancelled")]
    Cancelled,

    #[error("Certificate request denied: {0}")]
    Denied(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<IssueError> for CliError {
    fn from(e: IssueError) -> Self {
        CliError::client(e.to_string())
    }
}

/// Submits a CSR and waits for the CA to issue the certificate.
///
/// The deadline starts right before submission and bounds every wait and
/// every request. Cancellation interrupts any of them immediately.
pub struct CertificateIssuer<'a, C: CaApi + ?Sized> {
    api: &'a C,
    poll_interval: Duration,
    timeout: Duration,
}

impl<'a, C: CaApi + ?Sized> CertificateIssuer<'a, C> {
    pub fn new(api: &'a C) -> Self {
        Self {
            api,
            poll_interval: POLL_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the submit-then-poll cycle and return the certificate PEM.
    pub async fn issue(
        &self,
        request: &PostCsrRequest,
        cancel: &CancellationToken,
    ) -> Result<String, IssueError> {
        let deadline = Instant::now() + self.timeout;

        info!("Sending certificate request...");
        let mut response = self
            .bounded(self.api.submit_csr(request), deadline, cancel)
            .await?;
        debug!(request_id = %response.request_id, "Certificate request accepted");

        loop {
            if let Some(certificate) = response.certificate() {
                return Ok(certificate.to_string());
            }
            if response.is_denied() {
                let reason = response.message.unwrap_or_default();
                return Err(IssueError::Denied(reason));
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(IssueError::Cancelled),
                _ = sleep_until(deadline) => return Err(IssueError::TimedOut),
                _ = sleep(self.poll_interval) => {}
            }

            info!("Waiting for certificate response...");
            let request_id = response.request_id.clone();
            response = self
                .bounded(self.api.csr_status(&request_id), deadline, cancel)
                .await?;
        }
    }

    async fn bounded<F>(
        &self,
        call: F,
        deadline: Instant,
        cancel: &CancellationToken,
    ) -> Result<CsrStatusResponse, IssueError>
    where
        F: Future<Output = Result<CsrStatusResponse, ClientError>>,
    {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(IssueError::Cancelled),
            _ = sleep_until(deadline) => Err(IssueError::TimedOut),
            result = call => Ok(result?),
        }
    }
}
