//! Character classes and case folding for media type tokens.
//!
//! The token alphabet is deliberately narrower than RFC 2045's: ASCII letters,
//! digits, `-` and `_`. Anything else in a parameter value forces quoting.

use std::cmp::Ordering;

/// Reports whether the character may appear in an unquoted token.
///
/// token := 1*( ALPHA / DIGIT / "-" / "_" )
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Reports whether the character ends a run of quoted text: `"` or `\`.
pub fn is_string_special(c: char) -> bool {
    c == '"' || c == '\\'
}

/// Reports whether the character is printable ASCII (codes 32 through 126).
pub fn is_printable_ascii(c: char) -> bool {
    (' '..='~').contains(&c)
}

/// Reports whether the string is a valid token.
///
/// A token must be non-empty and contain only token characters.
pub fn is_token(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_token_char)
}

/// ASCII case-insensitive string equality.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// ASCII case-insensitive lexicographic comparison.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|b| b.to_ascii_lowercase())
        .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
}
