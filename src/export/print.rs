use anyhow::Result;
use serde_json::Value;

use super::text::values_to_text;
use crate::url_extractor::summary_heading;

const PRINT_STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Helvetica, Arial, sans-serif; padding: 1rem; }
pre { white-space: pre-wrap; word-wrap: break-word; background-color: #f6f8fa; padding: 1rem; border-radius: 6px; border: 1px solid #d1d5da; font-family: monospace; }
ul { list-style-type: none; padding: 0; }
li { padding: 0.25rem 0; border-bottom: 1px solid #eee; word-break: break-all; }";

/// Escapes angle brackets so content cannot open tags
pub fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Wraps `body` in a full page that opens the print dialog once loaded
pub fn print_document(title: &str, body: &str) -> String {
    format!(
        "<html>\n<head>\n<title>{}</title>\n<style>\n{}\n</style>\n</head>\n<body>{}<script>window.addEventListener('load', () => window.print());</script></body>\n</html>\n",
        escape_html(title),
        PRINT_STYLE,
        body
    )
}

pub fn values_to_html(key: &str, values: &[Value]) -> Result<String> {
    let content = escape_html(&values_to_text(values)?);
    let body = format!(
        "<h2>Values for key: \"{}\"</h2><pre>{}</pre>",
        escape_html(key),
        content
    );
    Ok(print_document(&format!("Print Extracted Values - {}", key), &body))
}

pub fn urls_to_html(urls: &[String]) -> String {
    let items: String = urls
        .iter()
        .map(|url| format!("<li>{}</li>", escape_html(url)))
        .collect();
    let body = format!("<h2>{}</h2><ul>{}</ul>", summary_heading(urls.len()), items);
    print_document("Print Extracted URLs", &body)
}
