//! STDIO transport implementation.
//!
//! stdout carries protocol frames, so all logging goes to stderr. The
//! byte-stream half is split out as [`StdioTransport::serve_streams`] so any
//! reader/writer pair can stand in for the process streams.

use rmcp::ServiceExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve on stdin/stdout until the host closes the stream.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let (stdin, stdout) = rmcp::transport::stdio();
        Self::serve_streams(server, stdin, stdout).await
    }

    /// Serve newline-delimited MCP messages read from `reader`, answering on
    /// `writer`, until the peer disconnects.
    pub async fn serve_streams<R, W>(
        server: McpServer,
        reader: R,
        writer: W,
    ) -> TransportResult<()>
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        let name = server.name().to_string();
        info!("{} ready - communicating via stdin/stdout", name);

        let service = server
            .serve((reader, writer))
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::service(e.to_string()))?;

        info!("{} transport finished", name);
        Ok(())
    }
}
