use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use discordbot_core::{Config, Dispatcher};
use discordbot_mcp::server::McpServer;
use discordbot_mcp::transport::deliver;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("discordbot=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().context("refusing to start")?;
    let dispatcher = Dispatcher::new(&config).context("failed to build HTTP client")?;
    let server = Arc::new(McpServer::new(dispatcher));
    tracing::info!(api_base = %config.api_base, "discordbot-mcp ready");

    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let writer = tokio::spawn(async move {
        let mut stdout = io::stdout();
        while let Some(resp) = rx.recv().await {
            stdout.write_all(resp.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    });

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let server = Arc::clone(&server);
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(resp) = server.handle_request(&line).await {
                deliver(&tx, resp);
            }
        });
    }

    drop(tx);
    writer.await??;

    Ok(())
}
