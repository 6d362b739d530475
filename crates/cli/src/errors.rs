//! Command error type and exit-code mapping.

use std::process::ExitCode;

use smsgate_client::{ClientError, ValidationError};
use thiserror::Error;

/// Failure of a single CLI invocation.
///
/// Each variant is a distinct error class with its own exit code; the
/// message is printed to stderr as `Error: <message>`.
#[derive(Error, Debug)]
pub enum CliError {
    /// Bad flags or arguments, detected before any network call.
    #[error("{0}")]
    Parameter(String),

    /// The gateway or the CA failed, rejected the request, or never answered.
    #[error("{0}")]
    Client(String),

    /// Rendering or writing the result failed.
    #[error("{0}")]
    Output(String),

    #[error("{0}")]
    Internal(String),
}

impl CliError {
    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::Parameter(msg.into())
    }

    pub fn client(msg: impl Into<String>) -> Self {
        Self::Client(msg.into())
    }

    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Process exit code for this error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Parameter(_) => 1,
            Self::Client(_) => 2,
            Self::Output(_) => 3,
            Self::Internal(_) => 4,
        }
    }

    /// Print the error to stderr and convert it into an exit code.
    pub fn report(&self) -> ExitCode {
        eprintln!("Error: {self}");
        ExitCode::from(self.exit_code())
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::Parameter(e.to_string())
    }
}

impl From<ClientError> for CliError {
    fn from(e: ClientError) -> Self {
        Self::Client(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::Output(e.to_string())
    }
}
