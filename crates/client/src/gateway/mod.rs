//! SMS gateway API: messages and webhooks.

mod client;
mod message;
mod webhook;

pub use client::{GatewayClient, GatewayConfig, DEFAULT_GATEWAY_ENDPOINT};
pub use message::{
    Message, MessageBuilder, MessagePayload, MessageState, ProcessingState, RecipientState,
    SendOptions, DEFAULT_DATA_PORT, PRIORITY_MAX, PRIORITY_MIN,
};
pub use webhook::{Webhook, WebhookEvent};
