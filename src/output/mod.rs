pub mod report;
pub mod terminal;

use crate::deck::Frame;
use crate::record::CheatRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

pub fn render_text(records: &[&CheatRecord]) -> Vec<u8> {
    let mut out = String::new();
    for r in records {
        out.push_str(r.reward());
        out.push('\n');
        if !r.description().is_empty() {
            out.push_str(r.description());
            out.push('\n');
        }
        out.push_str("code: ");
        out.push_str(r.code());
        out.push_str("\n\n");
    }
    out.into_bytes()
}

pub fn render_json(records: &[&CheatRecord]) -> Vec<u8> {
    serde_json::to_vec_pretty(records).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render_html(frame: &Frame, query: &str) -> Vec<u8> {
    report::render_html(frame, query)
}

/// Export bytes for `format`. Text and JSON cover every record matching the
/// search; HTML is the current page as drawn in `frame`.
pub fn render(
    format: OutputFormat,
    records: &[&CheatRecord],
    frame: &Frame,
    query: &str,
) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(records),
        OutputFormat::Json => render_json(records),
        OutputFormat::Html => render_html(frame, query),
    }
}
