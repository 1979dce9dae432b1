//! Char-indexed offsets over UTF-8 text.

/// Number of chars (Unicode scalar values) in `s`.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of the `char_idx`-th char, clamped to `s.len()`.
pub fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map_or(s.len(), |(byte, _)| byte)
}

/// The last `n` chars of `s` (all of `s` if shorter).
pub fn tail_chars(s: &str, n: usize) -> &str {
    let len = char_len(s);
    &s[byte_index(s, len.saturating_sub(n))..]
}
