//! Client configuration
//!
//! Every setting comes from an environment variable read exactly once at
//! startup; the resulting struct is passed down explicitly so the session
//! and facade layers never touch ambient state.

use std::env;

/// Default SSH target host.
pub const DEFAULT_HOST: &str = "windows-vm";

/// Default path to the automation server assembly on the remote machine.
pub const DEFAULT_SERVER_PATH: &str = "C:/Tools/WinAuto/WinAuto.Server.dll";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration, immutable after construction
#[derive(Debug, Clone)]
pub struct Config {
    /// SSH target host (`WINAUTO_SSH_HOST`)
    pub host: String,

    /// Path to the automation server assembly on the remote machine
    /// (`WINAUTO_SERVER_PATH`)
    pub server_path: String,

    /// Per-request timeout in seconds (`WINAUTO_TIMEOUT`)
    pub timeout_secs: u64,

    /// Full server command override (`WINAUTO_SERVER_CMD`), bypassing ssh.
    /// Used by the integration tests to point at a local mock server.
    pub server_cmd: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            server_path: DEFAULT_SERVER_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            server_cmd: None,
        }
    }
}

impl Config {
    /// Read the configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            host: env::var("WINAUTO_SSH_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            server_path: env::var("WINAUTO_SERVER_PATH")
                .unwrap_or_else(|_| DEFAULT_SERVER_PATH.to_string()),
            timeout_secs: parse_timeout(env::var("WINAUTO_TIMEOUT").ok()),
            server_cmd: env::var("WINAUTO_SERVER_CMD")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

/// Parse a timeout value, falling back to the default on anything
/// unparseable.
fn parse_timeout(raw: Option<String>) -> u64 {
    raw.and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS)
}
