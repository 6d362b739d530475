//! Command-line and environment configuration for both binaries.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand};
use smsgate_client::ca::DEFAULT_CA_ENDPOINT;
use smsgate_client::gateway::{DEFAULT_DATA_PORT, DEFAULT_GATEWAY_ENDPOINT};

use crate::output::Format;

/// CLI interface for working with SMS Gateway for Android
#[derive(Parser, Debug)]
#[command(name = "smsgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GatewayCli {
    /// Gateway API endpoint
    #[arg(
        short = 'e',
        long = "endpoint",
        env = "ASG_ENDPOINT",
        default_value = DEFAULT_GATEWAY_ENDPOINT
    )]
    pub endpoint: String,

    /// Username
    #[arg(short = 'u', long = "username", env = "ASG_USERNAME")]
    pub username: String,

    /// Password
    #[arg(
        short = 'p',
        long = "password",
        env = "ASG_PASSWORD",
        hide_env_values = true
    )]
    pub password: String,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Enable verbose logging (debug level)
    #[arg(long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: GatewayCommand,
}

#[derive(Subcommand, Debug)]
pub enum GatewayCommand {
    /// Send message
    Send(SendArgs),

    /// Get message status
    #[command(visible_alias = "state")]
    Status {
        /// Message ID
        #[arg(default_value = "")]
        id: String,
    },

    /// Manage webhooks
    #[command(subcommand, visible_aliases = ["w", "wh"])]
    Webhooks(WebhooksCommand),
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Message ID
    #[arg(long = "id")]
    pub id: Option<String>,

    /// Optional device ID for explicit selection
    #[arg(long = "device-id", visible_alias = "device")]
    pub device_id: Option<String>,

    /// Phone numbers (E.164 format, e.g. +19162255887)
    #[arg(
        short = 'p',
        long = "phones",
        visible_alias = "phone",
        value_delimiter = ',',
        action = ArgAction::Append,
        required = true
    )]
    pub phones: Vec<String>,

    /// SIM card index (one-based, 0 uses the device settings)
    #[arg(long = "sim-number", visible_alias = "sim", default_value_t = 0, allow_negative_numbers = true)]
    pub sim_number: i64,

    /// Request a delivery report
    #[arg(long = "delivery-report", default_value_t = true, action = ArgAction::Set)]
    pub delivery_report: bool,

    /// Priority, use >= 100 to bypass all limits and delays (-128 to 127)
    #[arg(long = "priority", default_value_t = 0, allow_negative_numbers = true)]
    pub priority: i64,

    /// Time to live (duration, e.g. 1h30m)
    #[arg(long = "ttl", value_parser = humantime::parse_duration)]
    pub ttl: Option<Duration>,

    /// Valid until (RFC 3339, e.g. 2006-01-02T15:04:05+07:00)
    #[arg(long = "valid-until", value_parser = parse_rfc3339)]
    pub valid_until: Option<DateTime<Utc>>,

    /// Send a data message; the content must be base64
    #[arg(long = "data")]
    pub data: bool,

    /// Destination port for data messages (1 to 65535)
    #[arg(long = "data-port", default_value_t = u64::from(DEFAULT_DATA_PORT))]
    pub data_port: u64,

    /// Skip phone number validation
    #[arg(long = "skip-phone-validation")]
    pub skip_phone_validation: bool,

    /// Only use devices active within this many hours
    #[arg(long = "device-active-within", default_value_t = 0)]
    pub device_active_within: u32,

    /// Message content
    #[arg(default_value = "")]
    pub content: String,
}

#[derive(Subcommand, Debug)]
pub enum WebhooksCommand {
    /// Register webhook
    #[command(visible_alias = "r")]
    Register {
        /// Webhook ID, assigned by the gateway when omitted
        #[arg(long = "id")]
        id: Option<String>,

        /// Device ID; the webhook is account-wide when omitted
        #[arg(long = "device-id")]
        device_id: Option<String>,

        /// Event, e.g. sms:received
        #[arg(short = 'e', long = "event")]
        event: String,

        /// Target URL
        #[arg(default_value = "")]
        url: String,
    },

    /// List webhooks
    #[command(visible_aliases = ["l", "ls"])]
    List,

    /// Delete webhook
    #[command(visible_aliases = ["d", "rm", "remove"])]
    Delete {
        /// Webhook ID
        #[arg(default_value = "")]
        id: String,
    },
}

fn parse_rfc3339(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp: {e}"))
}

/// CLI interface for interacting with the Certificate Authority of SMSGate
#[derive(Parser, Debug)]
#[command(name = "smsgate-ca")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CaCli {
    /// Certificate authority endpoint
    #[arg(
        short = 'e',
        long = "endpoint",
        env = "ASG_CA_ENDPOINT",
        default_value = DEFAULT_CA_ENDPOINT
    )]
    pub endpoint: String,

    /// How long to wait for the certificate (e.g. 30s, 2m)
    #[arg(
        short = 't',
        long = "timeout",
        env = "ASG_CA_TIMEOUT",
        default_value = "30s",
        value_parser = parse_timeout
    )]
    pub timeout: Duration,

    /// Enable verbose logging (debug level)
    #[arg(long = "verbose")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CaCommand,
}

#[derive(Subcommand, Debug)]
pub enum CaCommand {
    /// Issue a certificate for receiving webhooks on a local IP address
    #[command(visible_alias = "wh")]
    Webhooks(CertificateArgs),

    /// Issue a certificate for a private server on a local IP address
    #[command(visible_alias = "p")]
    Private(CertificateArgs),
}

#[derive(Args, Debug)]
pub struct CertificateArgs {
    /// Certificate output file
    #[arg(long = "out", default_value = "server.crt")]
    pub out: PathBuf,

    /// Private key output file
    #[arg(long = "keyout", default_value = "server.key")]
    pub keyout: PathBuf,

    /// Server IP address
    #[arg(default_value = "")]
    pub ip: String,
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let timeout = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    if timeout.is_zero() {
        return Err("Timeout must be greater than 0".to_string());
    }
    Ok(timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_clap_definitions_are_consistent() {
        GatewayCli::command().debug_assert();
        CaCli::command().debug_assert();
    }

    #[test]
    fn test_send_flags() {
        let cli = GatewayCli::try_parse_from([
            "smsgate", "-u", "user", "-p", "pass", "send", "-p", "+1,+2", "--phones", "+3",
            "--priority", "-5", "--ttl", "1h30m", "--delivery-report", "false", "Hello",
        ])
        .unwrap();

        let GatewayCommand::Send(args) = cli.command else {
            panic!("expected send");
        };
        assert_eq!(args.phones, ["+1", "+2", "+3"]);
        assert_eq!(args.priority, -5);
        assert_eq!(args.ttl, Some(Duration::from_secs(5400)));
        assert!(!args.delivery_report);
        assert_eq!(args.data_port, 53739);
        assert_eq!(args.content, "Hello");
        assert_eq!(cli.format, Format::Text);
        assert_eq!(cli.endpoint, DEFAULT_GATEWAY_ENDPOINT);
    }

    #[test]
    fn test_webhook_aliases() {
        let cli = GatewayCli::try_parse_from([
            "smsgate", "-u", "u", "-p", "p", "-f", "json", "wh", "r", "-e", "sms:sent",
            "https://example.com/hook",
        ])
        .unwrap();

        assert_eq!(cli.format, Format::Json);
        assert!(matches!(
            cli.command,
            GatewayCommand::Webhooks(WebhooksCommand::Register { ref event, ref url, .. })
                if event == "sms:sent" && url == "https://example.com/hook"
        ));

        for alias in ["l", "ls", "list"] {
            let cli = GatewayCli::try_parse_from(["smsgate", "-u", "u", "-p", "p", "w", alias])
                .unwrap();
            assert!(matches!(
                cli.command,
                GatewayCommand::Webhooks(WebhooksCommand::List)
            ));
        }
    }

    #[test]
    fn test_invalid_valid_until_is_rejected() {
        let result = GatewayCli::try_parse_from([
            "smsgate", "-u", "u", "-p", "p", "send", "-p", "+1", "--valid-until", "tomorrow",
            "Hi",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_ca_defaults() {
        let cli = CaCli::try_parse_from(["smsgate-ca", "wh", "192.168.1.10"]).unwrap();

        assert_eq!(cli.timeout, Duration::from_secs(30));
        assert_eq!(cli.endpoint, DEFAULT_CA_ENDPOINT);
        let CaCommand::Webhooks(args) = cli.command else {
            panic!("expected webhooks");
        };
        assert_eq!(args.ip, "192.168.1.10");
        assert_eq!(args.out, PathBuf::from("server.crt"));
        assert_eq!(args.keyout, PathBuf::from("server.key"));
    }

    #[test]
    fn test_ca_timeout_must_be_positive() {
        assert!(CaCli::try_parse_from(["smsgate-ca", "-t", "0s", "p", "10.0.0.1"]).is_err());

        let cli = CaCli::try_parse_from(["smsgate-ca", "--timeout", "2m", "p", "10.0.0.1"])
            .unwrap();
        assert_eq!(cli.timeout, Duration::from_secs(120));
        assert!(matches!(cli.command, CaCommand::Private(_)));
    }
}
