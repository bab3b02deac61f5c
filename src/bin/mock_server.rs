//! Mock automation server binary for integration testing
//!
//! Implements a minimal MCP stdio server (newline-delimited JSON-RPC) with
//! the four windows_* tools backed by an in-memory window table, so the
//! client can be exercised without ssh or a real Windows machine.

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Write};

use serde_json::{json, Value};

fn main() {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut reader = BufReader::new(stdin.lock());
    let mut writer = stdout.lock();

    let mut state = MockState::default();

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let message: Value = match serde_json::from_str(trimmed) {
            Ok(v) => v,
            Err(_) => continue,
        };

        if let Some(response) = state.process_message(&message) {
            send_message(&mut writer, &response);
        }
    }
}

fn send_message<W: Write>(writer: &mut W, message: &Value) {
    let body = serde_json::to_string(message).unwrap();
    writer.write_all(body.as_bytes()).ok();
    writer.write_all(b"\n").ok();
    writer.flush().ok();
}

#[derive(Default)]
struct MockState {
    next_window: usize,
    /// handle -> application name
    windows: BTreeMap<String, String>,
}

impl MockState {
    fn process_message(&mut self, message: &Value) -> Option<Value> {
        let method = message.get("method")?.as_str()?;

        // Notifications carry no id and get no response
        let id = match message.get("id") {
            Some(id) => id.clone(),
            None => return None,
        };

        let params = message.get("params").cloned().unwrap_or(json!({}));

        let result = match method {
            "initialize" => {
                // Echo the requested protocol version back
                let version = params
                    .get("protocolVersion")
                    .and_then(|v| v.as_str())
                    .unwrap_or("2025-06-18");
                json!({
                    "protocolVersion": version,
                    "capabilities": {"tools": {}},
                    "serverInfo": {"name": "mock-server", "version": "0.1.0"},
                })
            }
            "ping" => json!({}),
            "tools/list" => json!({"tools": tool_list()}),
            "tools/call" => {
                let name = params.get("name").and_then(|v| v.as_str()).unwrap_or("");
                let arguments = params.get("arguments").cloned().unwrap_or(json!({}));
                self.call_tool(name, &arguments)
            }
            _ => {
                return Some(json!({
                    "jsonrpc": "2.0",
                    "id": id,
                    "error": {"code": -32601, "message": format!("method not found: {method}")},
                }));
            }
        };

        Some(json!({"jsonrpc": "2.0", "id": id, "result": result}))
    }

    fn call_tool(&mut self, name: &str, arguments: &Value) -> Value {
        match name {
            "windows_launch" => {
                let app = arguments
                    .get("app")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown.exe")
                    .to_string();
                self.next_window += 1;
                let handle = format!("w{}", self.next_window);
                self.windows.insert(handle.clone(), app);
                text_result(false, &json!({"windowId": handle}).to_string())
            }

            "windows_snapshot" => match self.lookup(arguments) {
                Some((handle, app)) => {
                    let snapshot = format!(
                        "Window {handle} \"{app}\"\n  {handle}e1 Document \"\"\n  {handle}e2 MenuBar"
                    );
                    text_result(false, &snapshot)
                }
                None => unknown_window(arguments),
            },

            "windows_list_windows" => {
                let windows: Vec<Value> = self
                    .windows
                    .iter()
                    .map(|(handle, app)| json!({"windowId": handle, "title": app}))
                    .collect();
                text_result(false, &json!({"windows": windows}).to_string())
            }

            "windows_close" => match self.lookup(arguments) {
                Some((handle, _)) => {
                    self.windows.remove(&handle);
                    text_result(false, &format!("closed {handle}"))
                }
                None => unknown_window(arguments),
            },

            other => text_result(true, &format!("unknown tool: {other}")),
        }
    }

    fn lookup(&self, arguments: &Value) -> Option<(String, String)> {
        let handle = arguments.get("windowId")?.as_str()?;
        let app = self.windows.get(handle)?;
        Some((handle.to_string(), app.clone()))
    }
}

fn unknown_window(arguments: &Value) -> Value {
    text_result(
        true,
        &format!("no such window: {}", arguments.get("windowId").unwrap_or(&Value::Null)),
    )
}

fn text_result(is_error: bool, text: &str) -> Value {
    json!({
        "content": [{"type": "text", "text": text}],
        "isError": is_error,
    })
}

fn tool_list() -> Value {
    json!([
        {
            "name": "windows_launch",
            "description": "Launch an application and return its window handle",
            "inputSchema": {"type": "object"},
        },
        {
            "name": "windows_snapshot",
            "description": "Snapshot a window's element tree",
            "inputSchema": {"type": "object"},
        },
        {
            "name": "windows_list_windows",
            "description": "List all open windows",
            "inputSchema": {"type": "object"},
        },
        {
            "name": "windows_close",
            "description": "Close a window by handle",
            "inputSchema": {"type": "object"},
        },
    ])
}
