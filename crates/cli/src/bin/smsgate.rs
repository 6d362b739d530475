//! `smsgate`: command-line client for the SMS gateway API.

use std::process::ExitCode;

use clap::Parser;
use smsgate_cli::{parse_error_exit, run_gateway, CliError, GatewayCli};

fn main() -> ExitCode {
    let cli = match GatewayCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return parse_error_exit(e),
    };

    smsgate_common::init_tracing("warn", cli.verbose);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => return CliError::internal(format!("failed to start runtime: {e}")).report(),
    };

    let mut stdout = std::io::stdout().lock();
    match runtime.block_on(run_gateway(cli, &mut stdout)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => e.report(),
    }
}
