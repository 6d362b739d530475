//! `webhooks register|list|delete`.

use std::io::Write;

use smsgate_client::{Webhook, WebhookEvent, WebhookId};

use super::{emit, Context};
use crate::config::WebhooksCommand;
use crate::errors::CliError;

pub async fn run<W: Write>(
    ctx: &Context,
    command: &WebhooksCommand,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        WebhooksCommand::Register {
            id,
            device_id,
            event,
            url,
        } => {
            let webhook = registration(id.as_deref(), device_id.as_deref(), event, url)?;
            let created = ctx.client.register_webhook(&webhook).await?;
            emit(out, &ctx.renderer.webhook(&created)?)
        }
        WebhooksCommand::List => {
            let webhooks = ctx.client.list_webhooks().await?;
            emit(out, &ctx.renderer.webhooks(&webhooks)?)
        }
        WebhooksCommand::Delete { id } => {
            let id = id.trim();
            if id.is_empty() {
                return Err(CliError::parameter("ID is empty"));
            }
            ctx.client.delete_webhook(&WebhookId::new(id)).await?;
            emit(out, &ctx.renderer.success()?)
        }
    }
}

fn registration(
    id: Option<&str>,
    device_id: Option<&str>,
    event: &str,
    url: &str,
) -> Result<Webhook, CliError> {
    let event: WebhookEvent = event.trim().parse()?;
    let id = id.filter(|id| !id.is_empty()).map(WebhookId::new);
    Ok(Webhook::registration(
        id,
        url,
        event,
        device_id.map(str::to_string),
    )?)
}
