use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Canonical comparison form of a search term: trimmed, lowercased, with
/// diacritics removed. Never fails; blank input yields an empty string.
pub fn normalize_term(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        // A mark stranded after trailing whitespace leaves that whitespace behind
        .trim()
        .to_string()
}

/// True when either normalized term contains the other.
pub fn terms_overlap(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}
