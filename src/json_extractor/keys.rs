/// Case-insensitive substring filter over a key set
///
/// Returns a new view; the key set itself is left untouched. An empty query
/// matches every key.
pub fn filter_keys<'a>(keys: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    keys.iter()
        .filter(|key| key.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

/// Placeholder text for the key picker
pub fn key_picker_label(total: usize, matching: usize) -> String {
    if total == 0 {
        "No keys found".to_string()
    } else if matching == 0 {
        "No matching keys found".to_string()
    } else {
        format!("{} of {} keys... Select a key", matching, total)
    }
}
