//! String utilities for the domain layer.

/// Number of characters (Unicode scalar values) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Return the prefix of `s` holding at most `max_chars` characters.
///
/// Never splits a UTF-8 sequence. Returns `s` unchanged when it is short
/// enough.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("hello", 10), "hello");
        assert_eq!(truncate_chars("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 3 bytes per character
        assert_eq!(truncate_chars("あのね", 2), "あの");
        assert_eq!(char_len("あのね"), 3);
    }

    #[test]
    fn test_truncate_emoji() {
        assert_eq!(truncate_chars("👋🌍🎉", 1), "👋");
    }

    #[test]
    fn test_truncate_zero_and_empty() {
        assert_eq!(truncate_chars("abc", 0), "");
        assert_eq!(truncate_chars("", 3), "");
    }
}
