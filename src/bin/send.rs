//! Post standard input to a Mattermost channel as a logged-in user.
//!
//! Usage: `mattersend <config_file> <channel_id>`. The message body comes
//! from standard input; empty input exits successfully without touching the
//! network.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use mattersend::client::MattermostClient;
use mattersend::config::Config;
use mattersend::{input, logging};

/// Post standard input to a Mattermost channel as a logged-in user.
#[derive(Parser)]
#[command(name = "mattersend", version, about)]
struct Cli {
    /// Path to the `key = value` config file.
    config: PathBuf,

    /// Identifier of the channel to post into.
    channel_id: String,
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

/// Load config, collect stdin, log in, post.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config)?;
    debug!(?config, "config loaded");

    let Some(message) = input::read_message()
        .await
        .context("could not read standard input")?
    else {
        debug!("standard input empty, nothing to send");
        return Ok(());
    };

    let client = MattermostClient::new(config.server.clone());
    let token = client
        .login(&config.username, &config.password)
        .await
        .context("login failed")?;

    client
        .send_message(&token, &cli.channel_id, &message)
        .await
        .context("could not post message")?;

    debug!(channel_id = %cli.channel_id, "message delivered");
    Ok(())
}
