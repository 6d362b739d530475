//! SMSGate command-line tools.
//!
//! Two binaries share this library:
//!
//! - `smsgate`: send messages, query their state and manage webhooks
//! - `smsgate-ca`: obtain TLS certificates for private IP addresses
//!
//! Both print results on stdout, logs on stderr, and map every failure to a
//! [`CliError`] whose class decides the exit code.

pub mod ca;
pub mod commands;
pub mod config;
pub mod errors;
pub mod output;

use std::io::Write;
use std::process::ExitCode;

use smsgate_client::{CaClient, CsrType, GatewayClient, GatewayConfig};
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub use config::{CaCli, CaCommand, GatewayCli, GatewayCommand};
pub use errors::CliError;

use ca::CertificateFiles;
use commands::Context;

/// Execute a parsed `smsgate` invocation, printing results to `out`.
pub async fn run_gateway<W: Write>(cli: GatewayCli, out: &mut W) -> Result<(), CliError> {
    let client = GatewayClient::new(GatewayConfig {
        endpoint: cli.endpoint,
        username: cli.username,
        password: cli.password,
    })
    .map_err(|e| CliError::parameter(e.to_string()))?;
    debug!(endpoint = %client.endpoint(), format = ?cli.format, "Gateway client ready");

    let ctx = Context::new(client, cli.format.renderer());

    match &cli.command {
        GatewayCommand::Send(args) => commands::messages::send(&ctx, args, out).await,
        GatewayCommand::Status { id } => commands::messages::status(&ctx, id, out).await,
        GatewayCommand::Webhooks(command) => commands::webhooks::run(&ctx, command, out).await,
    }
}

/// Execute a parsed `smsgate-ca` invocation.
pub async fn run_ca(cli: CaCli, cancel: CancellationToken) -> Result<(), CliError> {
    let (args, purpose) = match cli.command {
        CaCommand::Webhooks(args) => (args, CsrType::Webhook),
        CaCommand::Private(args) => (args, CsrType::PrivateServer),
    };

    let client = CaClient::new(&cli.endpoint).map_err(|e| CliError::parameter(e.to_string()))?;
    debug!(endpoint = %client.endpoint(), timeout = ?cli.timeout, "CA client ready");

    let files = CertificateFiles::new(args.out, args.keyout);
    ca::issue_certificate(&client, &args.ip, purpose, &files, cli.timeout, &cancel).await
}

/// Report a command-line parse failure.
///
/// Help and version requests exit with 0; every real parse error is a
/// parameter error.
pub fn parse_error_exit(err: clap::Error) -> ExitCode {
    let _ = err.print();
    if err.use_stderr() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
