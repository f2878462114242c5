use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

/// Characters a URL never ends with
///
/// Keeps sentence punctuation and attribute quoting out of the match.
pub const TRAILING_PUNCTUATION: [char; 7] = [',', '.', ';', ':', '?', '!', '\''];

/// URL-shaped token: a scheme, then anything but whitespace, angle brackets,
/// parentheses or double quotes, never ending in trailing punctuation
pub static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:https?|ftp)://[^\s<>()"]*[^\s<>()".,;:?!']"#)
        .expect("URL pattern is valid")
});

/// Finds every URL-shaped substring in `text`
///
/// Matches are returned in order of appearance and duplicates are kept.
#[instrument(level = "debug", skip_all, fields(text_len = text.len()))]
pub fn scan_urls(text: &str) -> Vec<String> {
    let urls: Vec<String> = URL_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    debug!("Found {} URL occurrences", urls.len());
    urls
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_punctuation_is_trimmed() {
        let urls = scan_urls("Visit https://example.com/a.pdf, or http://x.org/b.jpg.");
        assert_eq!(urls, vec!["https://example.com/a.pdf", "http://x.org/b.jpg"]);
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let urls = scan_urls("HTTPS://Example.com/X and Ftp://files.example.org/pub");
        assert_eq!(urls, vec!["HTTPS://Example.com/X", "Ftp://files.example.org/pub"]);
    }

    #[test]
    fn test_html_attributes_and_brackets() {
        let text = r#"<a href="https://a.com/page">link</a> (see http://b.com/x) <http://c.com>"#;
        let urls = scan_urls(text);
        assert_eq!(urls, vec!["https://a.com/page", "http://b.com/x", "http://c.com"]);
    }

    #[test]
    fn test_single_quote_only_trimmed_at_end() {
        let urls = scan_urls("href='http://a.com/it's' done");
        assert_eq!(urls, vec!["http://a.com/it's"]);
    }

    #[test]
    fn test_query_string_kept_but_trailing_question_mark_dropped() {
        let urls = scan_urls("Is it http://a.com/search?q=1? Or http://b.com/?");
        assert_eq!(urls, vec!["http://a.com/search?q=1", "http://b.com/"]);
    }

    #[test]
    fn test_duplicates_kept_in_order() {
        let urls = scan_urls("http://a.com http://b.com http://a.com");
        assert_eq!(urls, vec!["http://a.com", "http://b.com", "http://a.com"]);
    }

    #[test]
    fn test_unsupported_schemes_ignored() {
        assert!(scan_urls("mailto:me@example.com file:///etc/hosts ws://x.com").is_empty());
        assert!(scan_urls("").is_empty());
    }
}
