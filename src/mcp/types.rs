//! Normalized response types
//!
//! The server returns heterogeneous content items; this module flattens
//! them into a closed set of typed entries so every output path (one-shot
//! call, session loop, scenario) prints the same shape.

use rmcp::model::{CallToolResult, RawContent, ResourceContents, Tool};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool exposed by the automation server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: Option<String>,
}

impl From<Tool> for ToolDescriptor {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name.into_owned(),
            description: tool.description.map(|d| d.into_owned()),
        }
    }
}

/// One normalized content item from a tool response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResponseEntry {
    /// Raw text, with a best-effort JSON parse attached when it succeeds.
    /// Plain non-JSON text is a legitimate payload, not an error.
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        parsed: Option<Value>,
    },

    /// Image payloads are reported by size only, never materialized.
    Image {
        #[serde(rename = "mimeType")]
        mime_type: String,
        data_length: usize,
    },

    Resource {
        uri: String,
        #[serde(rename = "mimeType")]
        mime_type: Option<String>,
    },

    /// Content kinds this client does not understand are passed through
    /// rather than silently dropped.
    Unknown { kind: String },
}

impl ResponseEntry {
    fn from_content(raw: RawContent) -> Self {
        match raw {
            RawContent::Text(text) => {
                let parsed = try_parse_json(&text.text);
                ResponseEntry::Text {
                    text: text.text,
                    parsed,
                }
            }
            RawContent::Image(image) => ResponseEntry::Image {
                mime_type: image.mime_type,
                data_length: image.data.len(),
            },
            RawContent::Resource(embedded) => {
                #[allow(unreachable_patterns)]
                match embedded.resource {
                    ResourceContents::TextResourceContents { uri, mime_type, .. }
                    | ResourceContents::BlobResourceContents { uri, mime_type, .. } => {
                        ResponseEntry::Resource { uri, mime_type }
                    }
                    _ => ResponseEntry::Unknown {
                        kind: "resource".to_string(),
                    },
                }
            }
            _ => ResponseEntry::Unknown {
                kind: "unknown".to_string(),
            },
        }
    }
}

/// The full normalized result of one tool invocation
///
/// `isError` is copied verbatim from the remote response; the client never
/// invents errors locally. Entry order matches the remote content order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvocationResult {
    #[serde(rename = "isError")]
    pub is_error: Option<bool>,
    pub content: Vec<ResponseEntry>,
}

impl From<CallToolResult> for InvocationResult {
    fn from(result: CallToolResult) -> Self {
        Self {
            is_error: result.is_error,
            content: result
                .content
                .into_iter()
                .map(|item| ResponseEntry::from_content(item.raw))
                .collect(),
        }
    }
}

/// Best-effort JSON parse: present on success, absent otherwise, never an
/// error.
fn try_parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> InvocationResult {
        let raw: CallToolResult = serde_json::from_value(value).expect("valid CallToolResult");
        InvocationResult::from(raw)
    }

    #[test]
    fn text_entry_with_valid_json_carries_parsed() {
        let result = normalize(json!({
            "content": [{"type": "text", "text": "{\"windowId\": \"w1\"}"}],
            "isError": false,
        }));

        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result.content,
            vec![ResponseEntry::Text {
                text: "{\"windowId\": \"w1\"}".to_string(),
                parsed: Some(json!({"windowId": "w1"})),
            }]
        );
    }

    #[test]
    fn text_entry_with_plain_text_has_no_parsed() {
        let result = normalize(json!({
            "content": [{"type": "text", "text": "Window w1 \"Untitled\""}],
            "isError": false,
        }));

        match &result.content[0] {
            ResponseEntry::Text { text, parsed } => {
                assert_eq!(text, "Window w1 \"Untitled\"");
                assert!(parsed.is_none());
            }
            other => panic!("expected text entry, got {other:?}"),
        }
    }

    #[test]
    fn image_entry_records_length_not_payload() {
        let result = normalize(json!({
            "content": [{"type": "image", "data": "AAAABBBB", "mimeType": "image/png"}],
            "isError": false,
        }));

        assert_eq!(
            result.content,
            vec![ResponseEntry::Image {
                mime_type: "image/png".to_string(),
                data_length: 8,
            }]
        );
    }

    #[test]
    fn resource_entry_records_uri_and_mime() {
        let result = normalize(json!({
            "content": [{
                "type": "resource",
                "resource": {"uri": "file:///tmp/shot.png", "mimeType": "image/png", "text": ""},
            }],
            "isError": false,
        }));

        assert_eq!(
            result.content,
            vec![ResponseEntry::Resource {
                uri: "file:///tmp/shot.png".to_string(),
                mime_type: Some("image/png".to_string()),
            }]
        );
    }

    #[test]
    fn entry_count_and_order_match_remote_content() {
        let result = normalize(json!({
            "content": [
                {"type": "text", "text": "first"},
                {"type": "image", "data": "AA", "mimeType": "image/bmp"},
                {"type": "text", "text": "[1, 2]"},
            ],
            "isError": true,
        }));

        assert_eq!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 3);
        assert!(matches!(&result.content[0], ResponseEntry::Text { text, .. } if text == "first"));
        assert!(matches!(&result.content[1], ResponseEntry::Image { .. }));
        assert!(matches!(
            &result.content[2],
            ResponseEntry::Text { parsed: Some(p), .. } if *p == json!([1, 2])
        ));
    }

    #[test]
    fn round_trip_preserves_flag_and_entries() {
        let result = normalize(json!({
            "content": [
                {"type": "text", "text": "{\"ok\": true}"},
                {"type": "image", "data": "AAAA", "mimeType": "image/png"},
            ],
            "isError": false,
        }));

        let serialized = serde_json::to_string(&result).expect("serialize");
        let restored: InvocationResult = serde_json::from_str(&serialized).expect("deserialize");
        assert_eq!(restored, result);
    }

    #[test]
    fn tool_descriptor_keeps_name_and_description() {
        let tool: Tool = serde_json::from_value(json!({
            "name": "windows_launch",
            "description": "Launch an application",
            "inputSchema": {"type": "object"},
        }))
        .expect("valid tool");

        let descriptor = ToolDescriptor::from(tool);
        assert_eq!(descriptor.name, "windows_launch");
        assert_eq!(descriptor.description.as_deref(), Some("Launch an application"));
    }

    #[test]
    fn tool_descriptor_without_description() {
        let tool: Tool = serde_json::from_value(json!({
            "name": "windows_status",
            "inputSchema": {"type": "object"},
        }))
        .expect("valid tool");

        let descriptor = ToolDescriptor::from(tool);
        assert_eq!(descriptor.description, None);
    }
}
