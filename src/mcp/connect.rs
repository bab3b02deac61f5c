//! Connection parameter construction
//!
//! Builds the command line used to reach the automation server. The default
//! path is ssh with keep-alive options so idle periods during interactive
//! use do not silently drop the connection; `WINAUTO_SERVER_CMD` swaps in an
//! arbitrary local command instead. Construction is pure and cannot fail -
//! connection failures surface when the session is opened.

use crate::common::Config;

/// ServerAliveInterval passed to ssh, in seconds.
const KEEP_ALIVE_INTERVAL_SECS: u32 = 30;

/// ServerAliveCountMax passed to ssh.
const KEEP_ALIVE_COUNT_MAX: u32 = 3;

/// Runner for the server assembly on the remote side.
const REMOTE_RUNNER: &str = "dotnet";

/// Parameters describing the server process to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerParams {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

/// Build the server command line from the configuration.
pub fn server_params(config: &Config) -> ServerParams {
    if let Some(cmd) = &config.server_cmd {
        let mut parts = cmd.split_whitespace().map(String::from);
        let command = parts.next().unwrap_or_default();
        return ServerParams {
            command,
            args: parts.collect(),
            timeout_secs: config.timeout_secs,
        };
    }

    ServerParams {
        command: "ssh".to_string(),
        args: vec![
            "-o".to_string(),
            format!("ServerAliveInterval={KEEP_ALIVE_INTERVAL_SECS}"),
            "-o".to_string(),
            format!("ServerAliveCountMax={KEEP_ALIVE_COUNT_MAX}"),
            config.host.clone(),
            REMOTE_RUNNER.to_string(),
            config.server_path.clone(),
        ],
        timeout_secs: config.timeout_secs,
    }
}
