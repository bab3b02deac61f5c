//! MCP session lifecycle and the tool invocation facade
//!
//! A `Session` owns one initialized, ordered request/response channel to the
//! automation server. Connecting performs the MCP handshake, so a
//! constructed session is always ready; `close` consumes the session, making
//! use-after-close unrepresentable. If a session is dropped without `close`
//! (panic, early `?`), the transport kills the child process, so the channel
//! is released on every exit path.
//!
//! Requests are strictly sequential: every facade method is awaited to
//! completion before the next one is issued, so at most one request is ever
//! in flight.

use std::time::Duration;

use async_trait::async_trait;
use rmcp::model::CallToolRequestParam;
use rmcp::service::{RoleClient, RunningService};
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use rmcp::ServiceExt;
use serde_json::{Map, Value};
use tokio::process::Command;

use crate::common::{Error, Result};

use super::connect::ServerParams;
use super::types::{InvocationResult, ToolDescriptor};

/// Argument mapping passed to a tool invocation.
pub type Arguments = Map<String, Value>;

/// The two facade operations, as a trait so the command loop and scenario
/// can run against an in-memory stub in tests.
#[async_trait]
pub trait ToolInvoker {
    /// Enumerate the tools exposed by the server, in remote order.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>>;

    /// Invoke a named tool; absent arguments become an empty mapping.
    async fn call_tool(&self, name: &str, arguments: Option<Arguments>)
        -> Result<InvocationResult>;
}

/// One live session with the automation server
pub struct Session {
    service: RunningService<RoleClient, ()>,
    timeout: Duration,
}

impl Session {
    /// Spawn the server process and perform the initialize handshake.
    pub async fn connect(params: &ServerParams) -> Result<Self> {
        let transport = TokioChildProcess::new(Command::new(&params.command).configure(|cmd| {
            cmd.args(&params.args);
        }))
        .map_err(|e| {
            Error::ConnectFailed(format!("failed to start '{}': {}", params.command, e))
        })?;

        let timeout = Duration::from_secs(params.timeout_secs);
        let service = tokio::time::timeout(timeout, ().serve(transport))
            .await
            .map_err(|_| Error::Timeout(params.timeout_secs))?
            .map_err(|e| Error::Handshake(e.to_string()))?;

        tracing::debug!("session initialized");
        Ok(Self { service, timeout })
    }

    /// Gracefully shut the session down and reap the server process.
    pub async fn close(self) -> Result<()> {
        self.service
            .cancel()
            .await
            .map_err(|e| Error::Shutdown(e.to_string()))?;
        Ok(())
    }

    async fn with_timeout<T>(
        &self,
        fut: impl std::future::Future<Output = std::result::Result<T, rmcp::service::ServiceError>>,
    ) -> Result<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| Error::Timeout(self.timeout.as_secs()))?
            .map_err(Error::from)
    }
}

#[async_trait]
impl ToolInvoker for Session {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        let result = self
            .with_timeout(self.service.list_tools(Default::default()))
            .await?;
        Ok(result.tools.into_iter().map(ToolDescriptor::from).collect())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Option<Arguments>,
    ) -> Result<InvocationResult> {
        let request = CallToolRequestParam {
            name: name.to_string().into(),
            arguments: Some(arguments.unwrap_or_default()),
        };

        tracing::debug!(tool = name, "calling tool");
        let result = self.with_timeout(self.service.call_tool(request)).await?;
        Ok(InvocationResult::from(result))
    }
}
