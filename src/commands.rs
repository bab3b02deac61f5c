//! CLI command definitions
//!
//! Defines the clap subcommands for the automation client.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// List all tools exposed by the automation server
    List,

    /// Call a single tool and print the normalized response
    Call {
        /// Tool name, e.g. windows_launch
        tool: String,

        /// Tool arguments as a JSON object, e.g. '{"app":"notepad.exe"}'
        arguments: Option<String>,
    },

    /// Interactive session: read commands from stdin, keep the connection open
    Session,

    /// Run the scripted launch/snapshot/close verification scenario
    Scenario,
}
