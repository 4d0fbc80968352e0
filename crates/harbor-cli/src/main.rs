//! Harbor CLI Application
//!
//! Command-line interface for the Harbor aftercare coordination tool.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use harbor_core::{params::ListClients, CoordinatorBuilder};
use log::info;
use mcp::{run_stdio_server, HarborMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let coordinator = CoordinatorBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize coordinator")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Harbor started");

    match command {
        Some(Client { command }) => {
            Cli::new(coordinator, renderer)
                .handle_client_command(command)
                .await
        }
        Some(Step { command }) => {
            Cli::new(coordinator, renderer)
                .handle_step_command(command)
                .await
        }
        Some(Shortlist { command }) => {
            Cli::new(coordinator, renderer)
                .handle_shortlist_command(command)
                .await
        }
        Some(Weekly { command }) => {
            Cli::new(coordinator, renderer)
                .handle_weekly_command(command)
                .await
        }
        Some(Task { command }) => {
            Cli::new(coordinator, renderer)
                .handle_task_command(command)
                .await
        }
        Some(Referent { command }) => {
            Cli::new(coordinator, renderer)
                .handle_referent_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Harbor MCP server");
            run_stdio_server(HarborMcpServer::new(coordinator))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(coordinator, renderer)
                .list_clients(&ListClients { discharged: false })
                .await
        }
    }
}
