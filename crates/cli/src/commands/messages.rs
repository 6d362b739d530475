//! `send` and `status`.

use std::io::Write;

use smsgate_client::{Message, MessageId, SendOptions};
use tracing::debug;

use super::{emit, Context};
use crate::config::SendArgs;
use crate::errors::CliError;

/// Build a message from the flags, send it and print the resulting state.
pub async fn send<W: Write>(ctx: &Context, args: &SendArgs, out: &mut W) -> Result<(), CliError> {
    let message = build_message(args)?;
    let options = SendOptions {
        skip_phone_validation: args.skip_phone_validation,
        device_active_within: (args.device_active_within > 0).then_some(args.device_active_within),
    };
    debug!(
        recipients = message.phone_numbers().len(),
        priority = message.priority(),
        "Message validated"
    );

    let state = ctx.client.send(&message, &options).await?;
    emit(out, &ctx.renderer.message_state(&state)?)
}

/// Fetch and print the state of a previously sent message.
pub async fn status<W: Write>(ctx: &Context, id: &str, out: &mut W) -> Result<(), CliError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CliError::parameter("Message ID is empty"));
    }

    let state = ctx.client.get_state(&MessageId::new(id)).await?;
    emit(out, &ctx.renderer.message_state(&state)?)
}

fn build_message(args: &SendArgs) -> Result<Message, CliError> {
    let mut builder = Message::builder()
        .phone_numbers(args.phones.iter().map(String::as_str))
        .sim_number(args.sim_number)
        .delivery_report(args.delivery_report)
        .priority(args.priority);

    if let Some(id) = &args.id {
        builder = builder.id(id.as_str());
    }
    if let Some(device_id) = &args.device_id {
        builder = builder.device_id(device_id.as_str());
    }
    if let Some(ttl) = args.ttl {
        builder = builder.ttl(ttl);
    }
    if let Some(valid_until) = args.valid_until {
        builder = builder.valid_until(valid_until);
    }

    builder = if args.data {
        builder.data(args.content.as_str(), args.data_port)
    } else {
        builder.text(args.content.as_str())
    };

    Ok(builder.build()?)
}
