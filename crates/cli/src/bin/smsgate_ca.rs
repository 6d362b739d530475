//! `smsgate-ca`: obtain TLS certificates for private IP addresses.

use std::process::ExitCode;

use clap::Parser;
use smsgate_cli::{parse_error_exit, run_ca, CaCli, CliError};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

fn main() -> ExitCode {
    let cli = match CaCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_error_exit(e),
    };

    // Progress lines are logged at info level.
    smsgate_common::init_tracing("info", cli.verbose);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => return CliError::internal(format!("failed to start runtime: {e}")).report(),
    };

    let result = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, cancelling");
                    on_signal.cancel();
                }
                Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
            }
        });

        run_ca(cli, cancel).await
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => e.report(),
    }
}
