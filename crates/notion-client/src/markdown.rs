//! Markdown rendering of content blocks.
//!
//! Rendering is total: every block produces some text, and block types without a
//! dedicated rule fall back to their rich text followed by a blank line.

use serde_json::Value;

use crate::models::ContentBlock;

/// Render rich-text runs (raw JSON, as found inside block payloads) to markdown.
///
/// Markers nest in a fixed order regardless of JSON key order:
/// `**` (bold) outside `_` (italic) outside `~~` (strikethrough) outside `` ` `` (code)
/// outside the `[text](href)` link.
pub fn render_rich_text(runs: &[Value]) -> String {
    runs.iter().map(render_run).collect()
}

fn render_run(run: &Value) -> String {
    let mut text = run_text(run).to_string();

    if let Some(href) = run_href(run) {
        text = format!("[{text}]({href})");
    }

    let flag = |name: &str| {
        run.get("annotations")
            .and_then(|a| a.get(name))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    };
    if flag("code") {
        text = format!("`{text}`");
    }
    if flag("strikethrough") {
        text = format!("~~{text}~~");
    }
    if flag("italic") {
        text = format!("_{text}_");
    }
    if flag("bold") {
        text = format!("**{text}**");
    }
    text
}

fn run_text(run: &Value) -> &str {
    run.get("text")
        .and_then(|t| t.get("content"))
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .or_else(|| run.get("plain_text").and_then(Value::as_str))
        .unwrap_or_default()
}

fn run_href(run: &Value) -> Option<&str> {
    run.get("href")
        .and_then(Value::as_str)
        .or_else(|| {
            run.get("text")
                .and_then(|t| t.get("link"))
                .and_then(|l| l.get("url"))
                .and_then(Value::as_str)
        })
        .filter(|href| !href.is_empty())
}

/// Render a single block to markdown.
pub fn render_block_to_text(block: &ContentBlock) -> String {
    let text = render_rich_text(block.rich_text());
    let field = |name: &str| block.content().and_then(|c| c.get(name));

    match block.block_type() {
        "paragraph" => format!("{text}\n\n"),
        "heading_1" => format!("# {text}\n\n"),
        "heading_2" => format!("## {text}\n\n"),
        "heading_3" => format!("### {text}\n\n"),
        "bulleted_list_item" => format!("* {text}\n"),
        "numbered_list_item" => format!("1. {text}\n"),
        "to_do" => {
            let checked = field("checked").and_then(Value::as_bool).unwrap_or(false);
            let mark = if checked { "x" } else { " " };
            format!("[{mark}] {text}\n")
        }
        "code" => {
            let language = field("language").and_then(Value::as_str).unwrap_or_default();
            format!("```{language}\n{text}\n```\n\n")
        }
        "quote" => format!("> {text}\n\n"),
        "divider" => "---\n\n".to_string(),
        _ => format!("{text}\n\n"),
    }
}

/// Render blocks in order and concatenate the result.
pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    blocks.iter().map(render_block_to_text).collect()
}
