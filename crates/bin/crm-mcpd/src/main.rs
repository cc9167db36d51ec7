//! Daemon entry point for the CRM MCP server.
//!
//! Loads configuration from the command line and environment, builds the CRM
//! client, and serves the MCP protocol over HTTP, stdio, or both.

mod config;

use crm_core::client::HttpCrmClient;
use crm_mcp::CrmMcp;
use crm_mcp::server::{McpHttpServerConfig, serve_http, serve_stdio};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::CrmConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Logs go to stderr so stdout stays reserved for the stdio transport.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = CrmConfig::from_args()?;
    init_tracing(&config.log);
    info!(?config, "starting crm-mcpd");

    let client = HttpCrmClient::builder()
        .base_url(config.api_base_url.as_str())
        .access_token(config.access_token.clone())
        .user_agent(concat!("crm-mcpd/", env!("CARGO_PKG_VERSION")))
        .build()?;
    if !client.is_configured() {
        warn!("CRM_ACCESS_TOKEN is not set; tool calls will fail until it is configured");
    }
    let service = CrmMcp::new(client);
    let http = McpHttpServerConfig::new(config.mcp_http_addr);

    match (config.mcp_serve, config.enable_stdio) {
        (true, true) => {
            tokio::try_join!(serve_http(service.clone(), http), serve_stdio(service))?;
        }
        (true, false) => serve_http(service, http).await?,
        (false, true) => serve_stdio(service).await?,
        (false, false) => warn!("no transport enabled"),
    }
    Ok(())
}
