//! Certificate authority API: CSR submission and status polling.

mod client;
mod types;

pub use client::{CaApi, CaClient, DEFAULT_CA_ENDPOINT};
pub use types::{CsrStatus, CsrStatusResponse, CsrType, PostCsrRequest};
