//! Session, connection parameters, and normalized response types for the
//! automation server's MCP endpoint

pub mod connect;
pub mod session;
pub mod types;

pub use connect::{server_params, ServerParams};
pub use session::{Arguments, Session, ToolInvoker};
pub use types::{InvocationResult, ResponseEntry, ToolDescriptor};
