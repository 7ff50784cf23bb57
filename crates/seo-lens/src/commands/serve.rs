//! Serve command: run the MCP server on stdio.

use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use seo_lens_core::Config;

use crate::server::PageServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
///
/// Stdout carries the protocol, so all logging must go to stderr or the log
/// file.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(_args: ServeArgs, config: Config) -> anyhow::Result<()> {
    info!(max_input = ?config.input_limit(), "starting MCP server on stdio");

    let service = PageServer::new(config)
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| anyhow::anyhow!("failed to start MCP server: {e}"))?;
    service.waiting().await?;

    info!("MCP server stopped");
    Ok(())
}
