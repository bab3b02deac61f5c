//! winauto - test client for the WinAuto automation server
//!
//! Connects to the automation server over an SSH-tunneled stdio transport
//! and provides four modes: list tools, call a single tool, an interactive
//! stdin session, and a scripted verification scenario.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use winauto_client::commands::Commands;
use winauto_client::{cli, common};

#[derive(Parser)]
#[command(name = "winauto", about = "Test client for the WinAuto automation server")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    common::logging::init();

    // Usage errors exit with status 1, not clap's default 2
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    let config = common::Config::from_env();

    match cli::dispatch(cli.command, &config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
