//! Scripted end-to-end verification scenario
//!
//! One live session, five steps: launch Notepad, snapshot it, verify it
//! shows up in the window list, close it, verify it is gone. Every check is
//! recorded by name; a failed check never stops the remaining steps, and
//! handle-dependent checks after a failed launch are recorded as failures
//! with a skip detail rather than silently dropped.

use std::process::ExitCode;
use std::time::Duration;

use serde_json::{json, Value};

use crate::common::{Config, Result};
use crate::mcp::{server_params, Arguments, InvocationResult, ResponseEntry, Session, ToolInvoker};

use super::outcome::TestOutcome;

/// Wall-clock settle delay after UI-changing steps.
const SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Run the scenario against a live server; exit 0 iff every check passed.
pub async fn run(config: &Config) -> Result<ExitCode> {
    let params = server_params(config);
    let session = Session::connect(&params).await?;
    println!("=== Session initialized ===\n");

    let outcome = run_checks(&session).await;
    let closed = session.close().await;
    let outcome = outcome?;
    closed?;

    Ok(outcome.summary())
}

async fn run_checks<C: ToolInvoker>(session: &C) -> Result<TestOutcome> {
    let mut outcome = TestOutcome::new();
    let mut window_handle: Option<String> = None;

    // --- Step 1: Launch Notepad ---
    println!("--- Step 1: Launch Notepad ---");
    let launch = session
        .call_tool("windows_launch", Some(object(json!({"app": "notepad.exe"}))))
        .await?;
    let launch_ok = launch.is_error != Some(true);
    outcome.check("Launch Notepad", launch_ok, &failure_detail(&launch, launch_ok)?);

    if launch_ok {
        window_handle = extract_window_handle(&launch);
        outcome.check("Got window handle", window_handle.is_some(), "");
    }

    tokio::time::sleep(SETTLE_DELAY).await;

    // --- Step 2: Take snapshot ---
    println!("\n--- Step 2: Take snapshot ---");
    if let Some(handle) = &window_handle {
        let snapshot = session
            .call_tool("windows_snapshot", Some(object(json!({"windowId": handle}))))
            .await?;
        let snap_ok = snapshot.is_error != Some(true);
        outcome.check(
            "Snapshot succeeded",
            snap_ok,
            &failure_detail(&snapshot, snap_ok)?,
        );

        if snap_ok {
            // Element refs look like w1e5; "e" is the marker character.
            // A response without any text entry counts as an empty snapshot.
            let text = first_text(&snapshot).unwrap_or("");
            outcome.check("Snapshot contains element refs", text.contains('e'), "");
        }
    } else {
        outcome.check("Snapshot (skipped - no window handle)", false, "");
    }

    // --- Step 3: Verify window in list ---
    println!("\n--- Step 3: Verify window in list ---");
    let windows = session.call_tool("windows_list_windows", None).await?;
    let list_ok = windows.is_error != Some(true);
    outcome.check("List windows succeeded", list_ok, "");

    if list_ok {
        if let Some(handle) = &window_handle {
            // Known-weak check: the handle may in principle appear elsewhere
            // in the serialized response
            let serialized = serde_json::to_string(&windows)?;
            outcome.check(
                &format!("Window {handle} in list"),
                serialized.contains(handle.as_str()),
                "",
            );
        }
    }

    // --- Step 4: Close window ---
    println!("\n--- Step 4: Close window ---");
    if let Some(handle) = &window_handle {
        let close = session
            .call_tool("windows_close", Some(object(json!({"windowId": handle}))))
            .await?;
        let close_ok = close.is_error != Some(true);
        outcome.check(
            "Close window succeeded",
            close_ok,
            &failure_detail(&close, close_ok)?,
        );
    } else {
        outcome.check("Close window (skipped - no handle)", false, "");
    }

    tokio::time::sleep(SETTLE_DELAY).await;

    // --- Step 5: Verify window is gone ---
    println!("\n--- Step 5: Verify window is gone ---");
    let windows = session.call_tool("windows_list_windows", None).await?;
    let list_ok = windows.is_error != Some(true);
    outcome.check("List windows after close succeeded", list_ok, "");

    if list_ok {
        if let Some(handle) = &window_handle {
            let serialized = serde_json::to_string(&windows)?;
            outcome.check(
                &format!("Window {handle} no longer in list"),
                !serialized.contains(handle.as_str()),
                "",
            );
        }
    }

    Ok(outcome)
}

fn object(value: Value) -> Arguments {
    match value {
        Value::Object(map) => map,
        _ => Arguments::new(),
    }
}

/// Serialize a failed result so the FAIL line carries the server's answer.
fn failure_detail(result: &InvocationResult, ok: bool) -> Result<String> {
    if ok {
        Ok(String::new())
    } else {
        Ok(serde_json::to_string(result)?)
    }
}

/// Scan the response entries for a parsed `windowId` field.
fn extract_window_handle(result: &InvocationResult) -> Option<String> {
    for entry in &result.content {
        if let ResponseEntry::Text {
            parsed: Some(Value::Object(fields)),
            ..
        } = entry
        {
            if let Some(id) = fields.get("windowId") {
                return Some(match id {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                });
            }
        }
    }
    None
}

fn first_text(result: &InvocationResult) -> Option<&str> {
    result.content.iter().find_map(|entry| match entry {
        ResponseEntry::Text { text, .. } => Some(text.as_str()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::common::Result;
    use crate::mcp::ToolDescriptor;

    fn text_entry(text: &str) -> ResponseEntry {
        ResponseEntry::Text {
            text: text.to_string(),
            parsed: serde_json::from_str(text).ok(),
        }
    }

    fn result_with(is_error: bool, entries: Vec<ResponseEntry>) -> InvocationResult {
        InvocationResult {
            is_error: Some(is_error),
            content: entries,
        }
    }

    /// Mimics the happy-path server: launch yields w1, the window is listed
    /// until closed, the snapshot carries element refs.
    #[derive(Default)]
    struct HappyServer {
        closed: Mutex<bool>,
    }

    #[async_trait]
    impl ToolInvoker for HappyServer {
        async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
            Ok(Vec::new())
        }

        async fn call_tool(
            &self,
            name: &str,
            _arguments: Option<Arguments>,
        ) -> Result<InvocationResult> {
            Ok(match name {
                "windows_launch" => result_with(false, vec![text_entry("{\"windowId\": \"w1\"}")]),
                "windows_snapshot" => result_with(
                    false,
                    vec![text_entry("Window w1 \"Untitled - Notepad\"\n  w1e1 Document \"\"")],
                ),
                "windows_list_windows" => {
                    let closed = *self.closed.lock().unwrap();
                    if closed {
                        result_with(false, vec![text_entry("{\"windows\": []}")])
                    } else {
                        result_with(
                            false,
                            vec![text_entry(
                                "{\"windows\": [{\"windowId\": \"w1\", \"title\": \"Untitled\"}]}",
                            )],
                        )
                    }
                }
                "windows_close" => {
                    *self.closed.lock().unwrap() = true;
                    result_with(false, vec![text_entry("closed w1")])
                }
                _ => result_with(true, vec![text_entry("unknown tool")]),
            })
        }
    }

    /// Like the happy path, but snapshots come back successful with no text
    /// entry at all.
    #[derive(Default)]
    struct TextlessSnapshotServer {
        inner: HappyServer,
    }

    #[async_trait]
    impl ToolInvoker for TextlessSnapshotServer {
        async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
            Ok(Vec::new())
        }

        async fn call_tool(
            &self,
            name: &str,
            arguments: Option<Arguments>,
        ) -> Result<InvocationResult> {
            if name == "windows_snapshot" {
                return Ok(result_with(
                    false,
                    vec![ResponseEntry::Image {
                        mime_type: "image/png".to_string(),
                        data_length: 4,
                    }],
                ));
            }
            self.inner.call_tool(name, arguments).await
        }
    }

    /// Server whose launch always fails; nothing else is ever reachable.
    struct FailingLaunchServer;

    #[async_trait]
    impl ToolInvoker for FailingLaunchServer {
        async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
            Ok(Vec::new())
        }

        async fn call_tool(
            &self,
            name: &str,
            _arguments: Option<Arguments>,
        ) -> Result<InvocationResult> {
            Ok(match name {
                "windows_launch" => result_with(true, vec![text_entry("launch rejected")]),
                "windows_list_windows" => result_with(false, vec![text_entry("{\"windows\": []}")]),
                _ => result_with(true, vec![text_entry("no window")]),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn happy_path_passes_all_nine_checks() {
        let server = HappyServer::default();
        let outcome = run_checks(&server).await.expect("scenario runs");

        assert_eq!(outcome.passed(), 9);
        assert_eq!(outcome.failed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_launch_still_runs_remaining_checks() {
        let outcome = run_checks(&FailingLaunchServer).await.expect("scenario runs");

        // Launch fails, snapshot and close are recorded as skipped failures,
        // both list calls still pass
        assert_eq!(outcome.passed(), 2);
        assert_eq!(outcome.failed(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn snapshot_without_text_entry_records_a_failed_check() {
        let server = TextlessSnapshotServer::default();
        let outcome = run_checks(&server).await.expect("scenario runs");

        // Same nine checks as the happy path; only the element-ref one fails
        assert_eq!(outcome.passed(), 8);
        assert_eq!(outcome.failed(), 1);
    }

    #[test]
    fn handle_extraction_reads_first_matching_entry() {
        let result = result_with(
            false,
            vec![
                text_entry("plain text"),
                text_entry("{\"windowId\": \"w7\"}"),
                text_entry("{\"windowId\": \"w8\"}"),
            ],
        );
        assert_eq!(extract_window_handle(&result), Some("w7".to_string()));
    }

    #[test]
    fn numeric_handles_are_rendered_as_literals() {
        let result = result_with(false, vec![text_entry("{\"windowId\": 42}")]);
        assert_eq!(extract_window_handle(&result), Some("42".to_string()));
    }

    #[test]
    fn missing_handle_yields_none() {
        let result = result_with(false, vec![text_entry("{\"status\": \"ok\"}")]);
        assert_eq!(extract_window_handle(&result), None);
    }
}
