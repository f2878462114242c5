use anyhow::{Context, Result};
use serde_json::Value;

use super::text::normalize_numbers;

/// Header used for URL lists
pub const URL_HEADER: &str = "URL";

/// Wraps a field in double quotes, doubling any quote inside it
pub fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Text written for one value: strings as-is, containers and null as
/// compact JSON, numbers and booleans in their JSON spelling
///
/// A bare number beyond `f64` range is written as `Infinity` or `-Infinity`.
fn value_field(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.as_f64().is_none() => {
            let sign = if n.to_string().starts_with('-') { "-" } else { "" };
            Ok(format!("{}Infinity", sign))
        }
        other => serde_json::to_string(&normalize_numbers(other)).context("Failed to serialize value for CSV"),
    }
}

/// Quoted key header followed by one quoted row per value
pub fn values_to_csv(key: &str, values: &[Value]) -> Result<String> {
    let mut lines = Vec::with_capacity(values.len() + 1);
    lines.push(quote(key));
    for value in values {
        lines.push(quote(&value_field(value)?));
    }
    Ok(lines.join("\n"))
}

/// `URL` header followed by one quoted row per URL
pub fn urls_to_csv(urls: &[String]) -> String {
    let mut lines = Vec::with_capacity(urls.len() + 1);
    lines.push(URL_HEADER.to_string());
    lines.extend(urls.iter().map(|url| quote(url)));
    lines.join("\n")
}
