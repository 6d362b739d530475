//! Certificate issuance for private IP addresses.
//!
//! The flow is strictly sequential:
//!
//! 1. validate the IP address ([`CertificateRequestIntent`])
//! 2. generate a P-256 key and CSR ([`request::generate`])
//! 3. submit the CSR and poll for approval ([`CertificateIssuer`])
//! 4. write certificate and key ([`CertificateFiles::persist`])
//!
//! Key material only leaves memory in step 4, after a certificate exists.

pub mod issuer;
pub mod request;
pub mod storage;

use std::time::Duration;

use smsgate_client::{CaApi, CsrType, PostCsrRequest};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::CliError;

pub use issuer::{CertificateIssuer, IssueError, POLL_INTERVAL};
pub use request::{CertificateRequestIntent, GeneratedCsr};
pub use storage::CertificateFiles;

/// Run the whole issuance flow for `ip` against `api`.
pub async fn issue_certificate<C: CaApi + ?Sized>(
    api: &C,
    ip: &str,
    purpose: CsrType,
    files: &CertificateFiles,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<(), CliError> {
    let intent = CertificateRequestIntent::parse(ip, purpose)?;
    debug!(ip = %intent.ip(), purpose = %purpose, "Requesting certificate");

    let generated = request::generate(&intent)?;
    let request = PostCsrRequest {
        csr_type: intent.purpose(),
        content: generated.csr_pem,
    };

    let certificate = CertificateIssuer::new(api)
        .with_timeout(timeout)
        .issue(&request, cancel)
        .await?;

    files.persist(&certificate, &generated.private_key_pem)
}
