//! Test client for a Windows UI-automation MCP server
//!
//! The automation server exposes `windows_*` tools over an MCP stdio
//! transport reached through ssh. This crate provides the session layer, a
//! tool invocation facade with normalized response entries, an interactive
//! command loop with explicit framing markers, and a scripted verification
//! scenario.

pub mod cli;
pub mod commands;
pub mod common;
pub mod mcp;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::{Config, Error, Result};
pub use mcp::{InvocationResult, ResponseEntry, Session, ToolDescriptor, ToolInvoker};
