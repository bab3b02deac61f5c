//! Error types for the automation client
//!
//! Transport and handshake failures are fatal; remote tool errors are not
//! errors at this level at all - they come back as data in the invocation
//! result for the caller to inspect.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the automation client
#[derive(Error, Debug)]
pub enum Error {
    // === Connection errors ===
    #[error("Failed to start server process: {0}")]
    ConnectFailed(String),

    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    #[error("Session shutdown failed: {0}")]
    Shutdown(String),

    // === Request errors ===
    #[error("Tool request failed: {0}")]
    Service(#[from] rmcp::service::ServiceError),

    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),

    // === User input errors ===
    #[error("Invalid JSON argument: {0}")]
    InvalidArguments(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
