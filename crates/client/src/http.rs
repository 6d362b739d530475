//! Shared request plumbing for the REST clients.

use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::errors::ClientError;

const USER_AGENT: &str = concat!("smsgate-cli/", env!("CARGO_PKG_VERSION"));

/// Build the underlying HTTP client.
pub(crate) fn build_http_client() -> Result<reqwest::Client, ClientError> {
    Ok(reqwest::Client::builder().user_agent(USER_AGENT).build()?)
}

/// Parse and normalize a base endpoint.
pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url, ClientError> {
    let url = Url::parse(endpoint.trim()).map_err(|e| ClientError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: "expected an absolute http(s) URL".to_string(),
        });
    }

    Ok(url)
}

/// Append path segments to the endpoint, percent-encoding each one.
pub(crate) fn join(base: &Url, segments: &[&str]) -> Result<Url, ClientError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidEndpoint {
            endpoint: base.to_string(),
            reason: "endpoint cannot carry a path".to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Fail with [`ClientError::Status`] unless the response is a 2xx.
pub(crate) async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        trace!(status = status.as_u16(), "Request succeeded");
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body = %body, "Request rejected by server");
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Check the status and decode a JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}
