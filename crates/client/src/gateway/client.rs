//! HTTP client for the SMS gateway API.

use tracing::{debug, info};
use url::Url;

use smsgate_common::{MessageId, WebhookId};

use super::message::{Message, MessageState, SendOptions};
use super::webhook::Webhook;
use crate::errors::ClientError;
use crate::http;

/// Public cloud endpoint of the gateway API.
pub const DEFAULT_GATEWAY_ENDPOINT: &str = "https://api.sms-gate.app/3rdparty/v1";

/// Connection settings for [`GatewayClient`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

/// SMS gateway client
///
/// Every call is a single request: failures surface immediately and are
/// never retried.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
}

impl GatewayClient {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidEndpoint`] if the endpoint is not an
    /// absolute http(s) URL.
    pub fn new(config: GatewayConfig) -> Result<Self, ClientError> {
        let base_url = http::parse_endpoint(&config.endpoint)?;
        debug!(endpoint = %base_url, "Creating gateway client");

        Ok(Self {
            http: http::build_http_client()?,
            base_url,
            username: config.username,
            password: config.password,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Enqueue a message for sending.
    pub async fn send(
        &self,
        message: &Message,
        options: &SendOptions,
    ) -> Result<MessageState, ClientError> {
        let url = http::join(&self.base_url, &["messages"])?;
        info!(
            recipients = message.phone_numbers().len(),
            "Sending message"
        );

        let response = self
            .request(reqwest::Method::POST, url)
            .query(&options.query())
            .json(message)
            .send()
            .await?;

        http::read_json(response).await
    }

    /// Fetch the current state of a message.
    pub async fn get_state(&self, id: &MessageId) -> Result<MessageState, ClientError> {
        let url = http::join(&self.base_url, &["messages", id.as_str()])?;
        debug!(message_id = %id, "Fetching message state");

        let response = self.request(reqwest::Method::GET, url).send().await?;
        http::read_json(response).await
    }

    pub async fn list_webhooks(&self) -> Result<Vec<Webhook>, ClientError> {
        let url = http::join(&self.base_url, &["webhooks"])?;
        debug!("Listing webhooks");

        let response = self.request(reqwest::Method::GET, url).send().await?;
        http::read_json(response).await
    }

    /// Register a webhook; the gateway echoes the stored subscription.
    pub async fn register_webhook(&self, webhook: &Webhook) -> Result<Webhook, ClientError> {
        let url = http::join(&self.base_url, &["webhooks"])?;
        info!(url = %webhook.url, event = %webhook.event, "Registering webhook");

        let response = self
            .request(reqwest::Method::POST, url)
            .json(webhook)
            .send()
            .await?;
        http::read_json(response).await
    }

    pub async fn delete_webhook(&self, id: &WebhookId) -> Result<(), ClientError> {
        let url = http::join(&self.base_url, &["webhooks", id.as_str()])?;
        info!(webhook_id = %id, "Deleting webhook");

        let response = self.request(reqwest::Method::DELETE, url).send().await?;
        http::ensure_success(response).await?;
        Ok(())
    }
}
