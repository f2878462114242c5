//! Locale-style string ordering.
//!
//! Orders strings the way a user-facing sorted list is expected to read:
//! case is ignored at first, whitespace and punctuation come before digits,
//! digits before letters. Only when two strings are otherwise equal does case
//! decide, lower case first, and the raw code points break any remaining tie
//! so the ordering stays total.
//!
//! This is an approximation of a real locale collation and differs from it
//! in two known ways:
//!
//! - Accented letters are not folded onto their base letter. They compare by
//!   code point after case folding, so `"éa"` sorts after `"eb"`.
//! - Punctuation keeps ASCII order among itself, so `-` sorts before `_`.
//!   Locale collations order punctuation by their own tables.

use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CharClass {
    Whitespace,
    Punctuation,
    Digit,
    Letter,
}

fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_numeric() {
        CharClass::Digit
    } else if c.is_alphabetic() {
        CharClass::Letter
    } else {
        CharClass::Punctuation
    }
}

fn primary_key(c: char) -> (CharClass, char) {
    let folded = c.to_lowercase().next().unwrap_or(c);
    (classify(c), folded)
}

/// Compares two strings with locale-style collation
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let primary = a.chars().map(primary_key).cmp(b.chars().map(primary_key));
    if primary != Ordering::Equal {
        return primary;
    }

    // Same letters, so decide on case: lower case sorts first
    let case = a
        .chars()
        .zip(b.chars())
        .find(|(x, y)| x != y)
        .map(|(x, y)| y.is_lowercase().cmp(&x.is_lowercase()))
        .unwrap_or(Ordering::Equal);

    case.then_with(|| a.cmp(b))
}
