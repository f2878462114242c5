use anyhow::{Context, Result};
use serde_json::{Number, Value};

/// Rewrites numbers the way a browser would serialize them
///
/// Integral floats lose their fraction (`1.0` becomes `1`, `1e2` becomes
/// `100`) and numbers beyond `f64` range become `null`. Everything else is
/// copied as-is.
pub fn normalize_numbers(value: &Value) -> Value {
    match value {
        Value::Number(n) => normalize_number(n),
        Value::Array(items) => Value::Array(items.iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, child)| (key.clone(), normalize_numbers(child)))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn normalize_number(n: &Number) -> Value {
    if n.is_i64() || n.is_u64() {
        return Value::Number(n.clone());
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::from(f as i64),
        Some(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        None => Value::Null,
    }
}

/// One URL per line, no trailing newline
pub fn urls_to_text(urls: &[String]) -> String {
    urls.join("\n")
}

/// The value list as a pretty-printed JSON array, indented by two spaces
pub fn values_to_text(values: &[Value]) -> Result<String> {
    let values: Vec<Value> = values.iter().map(normalize_numbers).collect();
    serde_json::to_string_pretty(&values).context("Failed to serialize extracted values")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_urls_joined_by_newline() {
        let urls = vec!["http://a.com".to_string(), "http://b.com".to_string()];
        assert_eq!(urls_to_text(&urls), "http://a.com\nhttp://b.com");
        assert_eq!(urls_to_text(&[]), "");
    }

    #[test]
    fn test_values_pretty_printed() {
        let text = values_to_text(&[json!(1), json!({"a": [true]})]).unwrap();
        assert_eq!(text, "[\n  1,\n  {\n    \"a\": [\n      true\n    ]\n  }\n]");
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(values_to_text(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_numbers_spelled_like_a_browser() {
        let values: Vec<Value> = serde_json::from_str(r#"[1.0, 1e2, -0.0, 2.50, 7, 1e400, {"n": [3.0]}]"#).unwrap();
        let text = values_to_text(&values).unwrap();
        let compact: String = text.split_whitespace().collect();
        assert_eq!(compact, r#"[1,100,0,2.5,7,null,{"n":[3]}]"#);
    }

    #[test]
    fn test_pretty_output_reparses_to_normalized_values() {
        let values: Vec<Value> = serde_json::from_str(r#"[{"a": 1.50, "b": "x"}, [10.0]]"#).unwrap();
        let reparsed: Vec<Value> = serde_json::from_str(&values_to_text(&values).unwrap()).unwrap();
        let normalized: Vec<Value> = values.iter().map(normalize_numbers).collect();
        assert_eq!(reparsed, normalized);
    }
}
