//! Plain-text extraction from rich-text block trees.
//!
//! The CMS delivers formatted content either as a plain string or as an array
//! of block nodes:
//!
//! ```json
//! [
//!   { "type": "paragraph", "children": [{ "type": "text", "text": "Hello " }, { "text": "world" }] },
//!   { "type": "image", "image": { "url": "/uploads/x.png" } }
//! ]
//! ```
//!
//! Only paragraph blocks carry text. Everything else contributes an empty line
//! and is trimmed away at the ends.

use serde_json::Value;

/// Plain text for a `content` value of either shape.
pub fn content_text(content: Option<&Value>) -> String {
    match content {
        Some(Value::String(s)) => s.clone(),
        Some(other) => extract_text(other),
        None => String::new(),
    }
}

/// Concatenate the text of every paragraph block, one paragraph per line.
///
/// Non-array input and malformed nodes yield empty text rather than an error.
pub fn extract_text(blocks: &Value) -> String {
    let Some(blocks) = blocks.as_array() else {
        return String::new();
    };

    blocks
        .iter()
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn paragraph_text(block: &Value) -> String {
    if block.get("type").and_then(Value::as_str) != Some("paragraph") {
        return String::new();
    }
    let Some(children) = block.get("children").and_then(Value::as_array) else {
        return String::new();
    };
    children
        .iter()
        .filter_map(|child| child.get("text").and_then(Value::as_str))
        .collect()
}
