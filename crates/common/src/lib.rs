//! Shared building blocks for the SMSGate command-line tools.
//!
//! - [`ids`]: typed identifiers for gateway and CA resources
//! - [`observability`]: `tracing` subscriber bootstrap for the binaries

pub mod ids;
pub mod observability;

pub use ids::{CsrRequestId, MessageId, WebhookId};
pub use observability::init_tracing;
