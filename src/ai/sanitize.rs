use lazy_static::lazy_static;
use regex::Regex;

/// Longest description the service will return, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 10_000;

/// Most words a tag may contain.
pub const MAX_TAG_WORDS: usize = 3;

lazy_static! {
    static ref NON_TAG_CHARS: Regex = Regex::new(r"[^a-zA-Z0-9 ]").unwrap();
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Reduces a raw model reply to a tag: newlines dropped, everything but ASCII
/// letters, digits and spaces removed, then at most three words kept.
pub fn sanitize_tag(raw: &str) -> String {
    let single_line = raw.replace(['\n', '\r'], "");
    let cleaned = NON_TAG_CHARS.replace_all(&single_line, "");
    cleaned
        .split_whitespace()
        .take(MAX_TAG_WORDS)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a raw model reply into a description: runs of three or more newlines
/// collapse to a blank line, surrounding whitespace is trimmed, and the result is
/// cut to `MAX_DESCRIPTION_CHARS` characters.
pub fn sanitize_description(raw: &str) -> String {
    let normalized = raw.replace("\r\n", "\n");
    let collapsed = EXCESS_NEWLINES.replace_all(&normalized, "\n\n");
    collapsed
        .trim()
        .chars()
        .take(MAX_DESCRIPTION_CHARS)
        .collect()
}
