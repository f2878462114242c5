pub mod collate;
pub mod logger;

/// Truncates a string for log output, keeping the first `max` characters
pub fn preview(value: &str, max: usize) -> String {
    if value.chars().count() > max {
        let head: String = value.chars().take(max).collect();
        format!("{}... (length: {})", head, value.len())
    } else {
        value.to_string()
    }
}
