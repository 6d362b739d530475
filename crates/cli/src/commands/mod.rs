//! Gateway command handlers.
//!
//! Handlers validate their input before touching the network, call the
//! gateway through [`Context::client`], and print the rendered result.

pub mod messages;
pub mod webhooks;

use std::io::Write;

use smsgate_client::GatewayClient;

use crate::errors::CliError;
use crate::output::Renderer;

/// Dependencies shared by all gateway commands.
pub struct Context {
    pub client: GatewayClient,
    pub renderer: Box<dyn Renderer>,
}

impl Context {
    pub fn new(client: GatewayClient, renderer: Box<dyn Renderer>) -> Self {
        Self { client, renderer }
    }
}

/// Print a rendered result; empty output prints nothing.
pub(crate) fn emit<W: Write>(out: &mut W, rendered: &str) -> Result<(), CliError> {
    if rendered.is_empty() {
        return Ok(());
    }
    writeln!(out, "{rendered}")?;
    Ok(())
}
