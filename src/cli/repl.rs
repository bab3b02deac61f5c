//! Interactive stdin command loop
//!
//! Reads line-oriented commands and emits explicitly framed output:
//! `SESSION_READY` once before the first read, `COMMAND_DONE` after every
//! processed line, so a supervising process can detect command boundaries
//! without guessing from timing. Every line is flushed immediately.
//!
//! Grammar (first token is case-sensitive):
//!   - blank line or `# comment`: ignored
//!   - `quit`: leave the loop
//!   - `list`: print the tool list as indented JSON
//!   - `call <tool> [json-object]`: invoke one tool
//!   - anything else: `{"error": "Unknown command: ..."}`
//!
//! Bad user input never terminates the loop; it is reported as a structured
//! error object and the completion marker is still emitted.

use std::io::Write;

use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::common::Result;
use crate::mcp::{Arguments, ToolInvoker};

/// Emitted once the handshake is done and the loop accepts commands.
pub const READY_MARKER: &str = "SESSION_READY";

/// Emitted after every processed line except `quit`.
pub const DONE_MARKER: &str = "COMMAND_DONE";

/// Run the command loop until `quit` or end of input.
pub async fn run<C, R, W>(client: &C, input: R, output: &mut W) -> Result<()>
where
    C: ToolInvoker,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{READY_MARKER}")?;
    output.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line == "quit" {
            break;
        }

        handle_line(client, line, output).await?;

        writeln!(output, "{DONE_MARKER}")?;
        output.flush()?;
    }

    Ok(())
}

/// Dispatch one non-empty command line. Only transport-level failures
/// return `Err`; user mistakes are printed as error objects.
async fn handle_line<C, W>(client: &C, line: &str, output: &mut W) -> Result<()>
where
    C: ToolInvoker,
    W: Write,
{
    let (command, rest) = split_first_token(line);

    match command {
        "list" => {
            let tools = client.list_tools().await?;
            writeln!(output, "{}", serde_json::to_string_pretty(&tools)?)?;
        }
        "call" if !rest.is_empty() => {
            let (tool, raw_args) = split_first_token(rest);
            let arguments = if raw_args.is_empty() {
                None
            } else {
                match parse_arguments(raw_args) {
                    Ok(arguments) => Some(arguments),
                    Err(detail) => {
                        writeln!(output, "{}", json!({"error": format!("Invalid JSON: {detail}")}))?;
                        output.flush()?;
                        return Ok(());
                    }
                }
            };

            let result = client.call_tool(tool, arguments).await?;
            writeln!(output, "{}", serde_json::to_string_pretty(&result)?)?;
        }
        _ => {
            writeln!(output, "{}", json!({"error": format!("Unknown command: {line}")}))?;
        }
    }

    output.flush()?;
    Ok(())
}

/// Split off the first whitespace-delimited token. The remainder keeps its
/// internal spacing because JSON arguments may contain spaces.
fn split_first_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], s[i..].trim_start()),
        None => (s, ""),
    }
}

/// Parse tool arguments from raw JSON text; anything but an object is
/// rejected.
pub(crate) fn parse_arguments(raw: &str) -> std::result::Result<Arguments, String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err("arguments must be a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}
