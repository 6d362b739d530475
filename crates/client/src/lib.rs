//! SMSGate REST clients
//!
//! Typed access to the two remote services used by the command-line tools:
//!
//! - [`GatewayClient`] - the SMS gateway API (messages and webhooks),
//!   authenticated with HTTP Basic credentials
//! - [`CaClient`] - the certificate authority that signs CSRs for private
//!   IP addresses; reachable through the [`CaApi`] trait so callers can
//!   substitute their own transport
//!
//! Request entities enforce their invariants at construction: a [`Message`]
//! can only be obtained from [`MessageBuilder::build`], and a registrable
//! [`Webhook`] only from [`Webhook::registration`].

mod errors;
mod http;

pub mod ca;
pub mod gateway;

pub use ca::{CaApi, CaClient, CsrStatus, CsrStatusResponse, CsrType, PostCsrRequest};
pub use errors::{ClientError, ValidationError};
pub use gateway::{
    GatewayClient, GatewayConfig, Message, MessageBuilder, MessagePayload, MessageState,
    ProcessingState, RecipientState, SendOptions, Webhook, WebhookEvent,
};

pub use smsgate_common::{CsrRequestId, MessageId, WebhookId};
