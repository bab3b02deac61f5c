//! CLI command handling
//!
//! Opens one session per process invocation, dispatches the subcommand, and
//! closes the session on every path - including a failure halfway through
//! the interactive loop.

pub mod repl;

use std::process::ExitCode;

use crate::commands::Commands;
use crate::common::{Config, Error, Result};
use crate::mcp::{server_params, Session, ToolInvoker};
use crate::scenario;

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config: &Config) -> Result<ExitCode> {
    match command {
        Commands::List => {
            let session = open_session(config).await?;
            let tools = session.list_tools().await;
            let closed = session.close().await;
            let tools = tools?;
            closed?;

            println!("{}", serde_json::to_string_pretty(&tools)?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Call { tool, arguments } => {
            // Parse before connecting; a bad argument should not spawn ssh
            let arguments = match arguments {
                Some(raw) => Some(repl::parse_arguments(&raw).map_err(Error::InvalidArguments)?),
                None => None,
            };

            let session = open_session(config).await?;
            let result = session.call_tool(&tool, arguments).await;
            let closed = session.close().await;
            let result = result?;
            closed?;

            // A remote isError response is data, not a local failure
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Session => {
            let session = open_session(config).await?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut stdout = std::io::stdout();

            let outcome = repl::run(&session, stdin, &mut stdout).await;
            let closed = session.close().await;
            outcome?;
            closed?;

            Ok(ExitCode::SUCCESS)
        }

        Commands::Scenario => scenario::run(config).await,
    }
}

async fn open_session(config: &Config) -> Result<Session> {
    let params = server_params(config);
    tracing::info!(command = %params.command, "connecting to automation server");
    Session::connect(&params).await
}
