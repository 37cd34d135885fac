//! Serve command: MCP server on stdio.

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use textlens_core::Session;
use tracing::info;

use crate::server::TextlensServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
///
/// Logs go to stderr and the log file; stdout carries the protocol.
pub async fn cmd_serve(
    _args: ServeArgs,
    session: Arc<Session>,
    max_input: Option<usize>,
) -> anyhow::Result<()> {
    info!(grammar = session.grammar().name(), "starting MCP server on stdio");

    let service = TextlensServer::new(session, max_input)
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    let reason = service.waiting().await.context("MCP server task failed")?;

    info!(?reason, "MCP server stopped");
    Ok(())
}
