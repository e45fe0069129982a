//! Utility functions and helpers.

pub mod http;

use unicode_segmentation::UnicodeSegmentation;

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Number of user-perceived characters in `s`.
pub fn char_len(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Keep at most `max` user-perceived characters of `s`.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.grapheme_indices(true).nth(max) {
        Some((idx, _)) => s[..idx].trim_end().to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(
            normalize_whitespace("  Colis\n\t  pris   en charge "),
            "Colis pris en charge"
        );
        assert_eq!(normalize_whitespace(" \n "), "");
    }

    #[test]
    fn test_char_len_counts_graphemes() {
        assert_eq!(char_len("Livré"), 5);
        assert_eq!(char_len("e\u{301}"), 1);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("éèà", 2), "éè");
        assert_eq!(truncate_chars("ab cd", 3), "ab");
    }
}
