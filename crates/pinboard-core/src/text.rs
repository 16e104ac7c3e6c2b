//! UTF-8–safe string truncation helpers.
//!
//! `&str[..n]` panics when `n` falls inside a multi-byte character, so both
//! helpers here snap to char boundaries. [`truncate_str`] works on a byte
//! budget (used to bound raw HTML before parsing); [`excerpt_chars`] works
//! on a character count (the context aggregator truncates fetched text by
//! characters, not bytes).

/// Truncate a string to at most `max_bytes` bytes at a char boundary.
///
/// Returns the longest prefix of `s` whose byte length is ≤ `max_bytes`
/// and that does not split a multi-byte character.
#[inline]
#[must_use]
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    // `floor_char_boundary` is nightly-only; walk back to a boundary.
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Return the first `max_chars` characters of `s`.
///
/// Character-counted (not byte-counted, not word-boundary-aware). If the
/// string has `max_chars` characters or fewer it is returned whole.
#[must_use]
pub fn excerpt_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── truncate_str ─────────────────────────────────────────────────────

    #[test]
    fn bytes_within_limit() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn bytes_exact_limit() {
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn bytes_truncated() {
        assert_eq!(truncate_str("hello world", 5), "hello");
    }

    #[test]
    fn bytes_zero_max() {
        assert_eq!(truncate_str("hello", 0), "");
    }

    #[test]
    fn bytes_snap_back_inside_multibyte() {
        // 'é' (U+00E9) is 2 bytes: c(0) a(1) f(2) é(3,4)
        let s = "café";
        assert_eq!(truncate_str(s, 4), "caf");
        assert_eq!(truncate_str(s, 5), "café");
    }

    #[test]
    fn bytes_emoji_boundary() {
        // '🦀' is 4 bytes at 2..6
        let s = "hi🦀bye";
        assert_eq!(truncate_str(s, 3), "hi");
        assert_eq!(truncate_str(s, 6), "hi🦀");
    }

    // ── excerpt_chars ────────────────────────────────────────────────────

    #[test]
    fn chars_within_limit() {
        assert_eq!(excerpt_chars("hello", 10), "hello");
    }

    #[test]
    fn chars_exact_limit() {
        assert_eq!(excerpt_chars("hello", 5), "hello");
    }

    #[test]
    fn chars_truncated() {
        assert_eq!(excerpt_chars("hello world", 5), "hello");
    }

    #[test]
    fn chars_counts_characters_not_bytes() {
        // Each '—' is 3 bytes but one character.
        assert_eq!(excerpt_chars("———ab", 3), "———");
        assert_eq!(excerpt_chars("———ab", 4), "———a");
    }

    #[test]
    fn chars_empty_input() {
        assert_eq!(excerpt_chars("", 5), "");
    }

    #[test]
    fn chars_zero_max() {
        assert_eq!(excerpt_chars("hello", 0), "");
    }

    #[test]
    fn chars_long_text_exact_count() {
        let s = "x".repeat(5000);
        assert_eq!(excerpt_chars(&s, 4000).chars().count(), 4000);
    }
}
