//! MCP server runners for crm-mcp.

use std::net::{Ipv4Addr, SocketAddr};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use crm_core::client::CrmApi;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::CrmMcp;
use crate::router::RpcResponse;

pub type ServeError = Box<dyn std::error::Error + Send + Sync>;

pub const DEFAULT_HTTP_PORT: u16 = 4020;

/// Configuration for the HTTP JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_HTTP_PORT)))
    }
}

/// Builds the HTTP routes.
///
/// `POST /mcp` always answers 200 with a JSON-RPC envelope, `OPTIONS /mcp`
/// answers 200 for preflight, and any other method on `/mcp` gets 405.
pub fn router<A>(service: CrmMcp<A>) -> Router
where
    A: CrmApi + 'static,
{
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/mcp", post(rpc_handler::<A>).options(|| async { StatusCode::OK }))
        .with_state(service)
        .layer(CorsLayer::permissive())
}

async fn rpc_handler<A>(State(service): State<CrmMcp<A>>, body: Bytes) -> Json<RpcResponse>
where
    A: CrmApi + 'static,
{
    Json(service.handle_body(&body).await)
}

/// Serves JSON-RPC over HTTP.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_http<A>(service: CrmMcp<A>, config: McpHttpServerConfig) -> Result<(), ServeError>
where
    A: CrmApi + 'static,
{
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "serving MCP over HTTP");
    axum::serve(listener, router(service)).await?;
    Ok(())
}

/// Serves line-delimited JSON-RPC over stdin/stdout.
///
/// # Errors
/// Returns any I/O error on the standard streams.
pub async fn serve_stdio<A: CrmApi>(service: CrmMcp<A>) -> Result<(), ServeError> {
    info!("serving MCP over stdio");
    serve_lines(
        &service,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

/// Reads one request per line and writes one response per line. Blank lines
/// and notifications produce no output.
///
/// # Errors
/// Returns any read, write, or encode error.
pub async fn serve_lines<A, R, W>(service: &CrmMcp<A>, reader: R, mut writer: W) -> Result<(), ServeError>
where
    A: CrmApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(response) = service.handle_line(&line).await else {
            continue;
        };
        let mut output = serde_json::to_vec(&response)?;
        output.push(b'\n');
        writer.write_all(&output).await?;
        writer.flush().await?;
    }
    Ok(())
}
