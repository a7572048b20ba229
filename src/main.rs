use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

mod cli;
mod commands;
mod config;
mod embedded;
mod gateway;
mod server;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment (logging filter, clap env fallbacks)
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Warning: Error loading .env file: {e}");
    }

    // Initialize logging
    env_logger::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle list-categories flag
    if cli.list_categories {
        println!("Available tool categories:");
        for category in cli::available_categories() {
            println!("  - {category}");
        }
        return Ok(());
    }

    // Handle list-tools flag
    if cli.list_tools {
        println!("Available tools:");
        for tool in cli::available_tools() {
            println!("  - {tool}");
        }
        return Ok(());
    }

    // Handle list-toolsets flag
    if cli.list_toolsets {
        println!("Available bundled toolsets:");
        for toolset in embedded::list_toolsets() {
            println!("  - {toolset}");
        }
        return Ok(());
    }

    // Get enabled tools from CLI (--tool/--tools/--toolset)
    let enabled_tools = cli.enabled_tools().await?;

    // VALIDATE IMMEDIATELY - before any initialization
    if let Some(ref tools) = enabled_tools {
        let invalid = cli::invalid_tools(tools);

        if !invalid.is_empty() {
            eprintln!("Error: Invalid tool names specified:");
            for tool in &invalid {
                eprintln!("  - {tool}");
            }
            eprintln!();
            eprintln!("Available tools:");
            for tool in cli::available_tools() {
                eprintln!("  - {tool}");
            }
            eprintln!();
            eprintln!("Tip: Use --list-tools to see all available tools");
            eprintln!("Tip: Use --toolset metric_model|enriched_data|pull_request for a bundled set");
            return Err(anyhow::anyhow!("Invalid tool names specified"));
        }
    }

    let server_config = Arc::new(cli.server_config());
    if server_config.access_token().is_none() {
        log::warn!(
            "{} is not set; tools will answer with a 401 envelope until it is configured",
            config::ACCESS_TOKEN_ENV
        );
    }
    log::info!("Forwarding tool calls to {}", server_config.base_url());
    log::debug!("Gateway configuration: {server_config:?}");

    let gateway = gateway::MetricGateway::new(server_config)?;
    let server = server::CompassServer::new(gateway, enabled_tools);

    // Handle subcommands
    if let Some(Commands::Call {
        tool,
        label,
        begin_date,
        end_date,
        page,
        size,
        direction,
        token,
    }) = cli.command
    {
        let args = commands::call::CallArgs {
            label,
            begin_date,
            end_date,
            page,
            size,
            direction,
            token,
        };
        return commands::handle_call(&server, &tool, args).await;
    }

    match cli.sse {
        Some(addr) => {
            // Create cancellation token for graceful shutdown
            let shutdown_token = tokio_util::sync::CancellationToken::new();

            // Spawn cross-platform signal handler
            let signal_token = shutdown_token.clone();
            tokio::spawn(async move {
                wait_for_interrupt().await;
                log::debug!("Received interrupt signal, shutting down");
                signal_token.cancel();
            });

            server.serve_sse(addr, shutdown_token).await?;
        }
        None => server.serve_stdio().await?,
    }

    Ok(())
}

/// Wait for interrupt signal (cross-platform)
#[cfg(unix)]
async fn wait_for_interrupt() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm_result = signal(SignalKind::terminate());
    let mut sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result.as_mut(), sigint_result.as_mut()) {
        (Ok(sigterm), Ok(sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = sigint.recv() => {}
            }
        }
        (Ok(sigterm), Err(_)) => {
            let _ = sigterm.recv().await;
        }
        (Err(_), Ok(sigint)) => {
            let _ = sigint.recv().await;
        }
        (Err(_), Err(_)) => {
            // If both fail, just wait forever (shouldn't happen)
            let () = std::future::pending().await;
        }
    }
}

/// Wait for interrupt signal (cross-platform)
#[cfg(windows)]
async fn wait_for_interrupt() {
    use tokio::signal::windows;

    match windows::ctrl_c() {
        Ok(mut ctrl_c) => {
            let _ = ctrl_c.recv().await;
        }
        Err(_) => {
            // If ctrl_c fails, wait forever (shouldn't happen)
            let () = std::future::pending().await;
        }
    }
}
