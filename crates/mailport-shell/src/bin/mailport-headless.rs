//! Headless development harness
//!
//! Feeds newline-delimited bridge JSON from stdin into the shell and
//! prints emitted events, so the engine can be exercised without a
//! webview embedding. `quit` on a line by itself exits.

use anyhow::Result;
use mailport_core::SettingsStore;
use mailport_notify::{DesktopBackend, NotificationService};
use mailport_resolver::LinkResolver;
use mailport_shell::{Shell, ShellCommand, ShellEvent};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("mailport=debug".parse()?))
        .init();

    tracing::info!("Starting Mailport headless harness");

    let resolver = Arc::new(LinkResolver::new()?);
    let notifications = NotificationService::new(Arc::new(DesktopBackend::new()));
    let settings_store = SettingsStore::new()?;

    let (command_tx, command_rx) = mpsc::channel::<ShellCommand>(64);
    let (event_tx, mut event_rx) = mpsc::channel::<ShellEvent>(64);

    let shell = Shell::new(resolver, notifications, settings_store, event_tx);
    let shell_task = tokio::spawn(shell.run(command_rx));

    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match &event {
                // Script bodies are long; print their first line only
                ShellEvent::InjectScript(script) => {
                    let head = script.lines().next().unwrap_or_default();
                    println!("InjectScript: {}", head);
                }
                other => println!("{:?}", other),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }
        command_tx
            .send(ShellCommand::BridgeRaw(line.to_string()))
            .await?;
    }

    let _ = command_tx.send(ShellCommand::Shutdown).await;
    shell_task.await?;
    printer.await?;
    Ok(())
}
