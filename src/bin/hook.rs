//! Post standard input to Mattermost through an incoming webhook.
//!
//! Usage: `mattersend-hook <config_file> [channel]`. The optional channel
//! argument diverts the message from the webhook's default channel. The
//! message body comes from standard input; empty input exits successfully
//! without touching the network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use mattersend::client::WebhookClient;
use mattersend::config::WebhookConfig;
use mattersend::{input, logging};

/// Post standard input to Mattermost through an incoming webhook.
#[derive(Parser)]
#[command(name = "mattersend-hook", version, about)]
struct Cli {
    /// Path to the `key = value` config file.
    config: PathBuf,

    /// Channel to post into instead of the webhook's default.
    channel: Option<String>,
}

#[tokio::main]
async fn main() {
    // clap exits 2 on usage errors; everything abnormal here exits 1.
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(1);
    });

    logging::init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

/// Load config, collect stdin, post through the webhook.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = WebhookConfig::load(&cli.config)?;
    debug!("webhook config loaded");

    let Some(message) = input::read_message()
        .await
        .context("could not read standard input")?
    else {
        debug!("standard input empty, nothing to send");
        return Ok(());
    };

    let client = WebhookClient::new(config.webhook_url.clone());
    client
        .send(&message, cli.channel.as_deref())
        .await
        .context("could not post message")?;

    debug!("message delivered");
    Ok(())
}
