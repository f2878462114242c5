//! Lexical passes over raw JSON text that run before the parser
//!
//! The parser itself is strict about two things that plain JSON text allows:
//! arbitrarily deep nesting and unpaired UTF-16 surrogate escapes. Both are
//! settled here so the parser only ever rejects text that is not JSON.

use std::borrow::Cow;

/// Escape written in place of an unpaired surrogate
const REPLACEMENT_ESCAPE: &str = "\\uFFFD";

/// Deepest bracket nesting in `text`, ignoring brackets inside strings
///
/// The root container counts as level one, so `[[1]]` has a depth of two.
/// Unbalanced text is measured as far as it goes; the parser reports it.
pub fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for byte in text.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'[' | b'{' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b']' | b'}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    deepest
}

/// Rewrites `\uXXXX` escapes that name half of a surrogate pair without the
/// other half as `\uFFFD`
///
/// Well-formed pairs and every other escape are copied through untouched.
/// Returns the input unchanged when there is nothing to rewrite.
pub fn replace_lone_surrogates(text: &str) -> Cow<'_, str> {
    if !text.contains("\\u") {
        return Cow::Borrowed(text);
    }

    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }

        let Some(unit) = unicode_escape_at(bytes, i) else {
            // Any other escape, including `\\`, is two bytes long
            i += 2;
            continue;
        };

        if is_high_surrogate(unit) {
            if unicode_escape_at(bytes, i + 6).is_some_and(is_low_surrogate) {
                i += 12;
                continue;
            }
        } else if !is_low_surrogate(unit) {
            i += 6;
            continue;
        }

        out.push_str(&text[copied..i]);
        out.push_str(REPLACEMENT_ESCAPE);
        i += 6;
        copied = i;
    }

    if copied == 0 {
        return Cow::Borrowed(text);
    }
    out.push_str(&text[copied..]);
    Cow::Owned(out)
}

/// The code unit of a `\uXXXX` escape starting at `at`, if there is one
fn unicode_escape_at(bytes: &[u8], at: usize) -> Option<u16> {
    let escape = bytes.get(at..at + 6)?;
    if escape[0] != b'\\' || escape[1] != b'u' {
        return None;
    }
    let hex = std::str::from_utf8(&escape[2..]).ok()?;
    u16::from_str_radix(hex, 16).ok()
}

fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}
