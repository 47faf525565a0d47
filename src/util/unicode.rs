//! Unicode utilities
//!
//! Strings are stored as UTF-8 but indexed by UTF-16 code units, so
//! every positional string operation translates between the two.

/// Check if a code point is a line terminator
#[inline]
pub fn is_line_terminator(c: u32) -> bool {
    matches!(c, 0x000A | 0x000D | 0x2028 | 0x2029)
}

/// Check if a code point is whitespace
#[inline]
pub fn is_whitespace(c: u32) -> bool {
    matches!(
        c,
        0x0009  // Tab
        | 0x000B // Vertical Tab
        | 0x000C // Form Feed
        | 0x0020 // Space
        | 0x00A0 // No-Break Space
        | 0xFEFF // BOM
    ) || is_line_terminator(c)
        || is_unicode_space(c)
}

/// Check if a code point is a Unicode space character
#[inline]
pub fn is_unicode_space(c: u32) -> bool {
    matches!(c, 0x1680 | 0x2000..=0x200A | 0x202F | 0x205F | 0x3000)
}

/// Trim JavaScript whitespace from both ends
pub fn trim_js(s: &str) -> &str {
    s.trim_matches(|c: char| is_whitespace(c as u32))
}

/// Get UTF-16 length from UTF-8 string
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(|c| c.len_utf16()).sum()
}

/// Convert UTF-8 index to UTF-16 index
///
/// `utf8_index` must lie on a char boundary.
pub fn utf8_to_utf16_index(s: &str, utf8_index: usize) -> usize {
    s[..utf8_index].chars().map(|c| c.len_utf16()).sum()
}

/// Convert UTF-16 index to UTF-8 index
///
/// Returns the byte offset of the code point containing the code unit,
/// and whether the unit is the second half of a surrogate pair. Indices
/// at or past the end map to the byte length.
pub fn utf16_to_utf8_index(s: &str, utf16_index: usize) -> (usize, bool) {
    let mut utf16_pos = 0;
    for (utf8_pos, c) in s.char_indices() {
        if utf16_pos == utf16_index {
            return (utf8_pos, false);
        }
        utf16_pos += c.len_utf16();
        if utf16_pos > utf16_index {
            return (utf8_pos, true);
        }
    }
    (s.len(), false)
}
