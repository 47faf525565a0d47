//! JavaScript string representation
//!
//! Strings are stored as UTF-8 internally but the language indexes them
//! in UTF-16 code units. `JSString` caches the UTF-16 length and an
//! ASCII flag so the common case needs no translation at all.

use crate::util::unicode::{utf8_to_utf16_index, utf16_len, utf16_to_utf8_index};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

#[derive(Debug)]
struct StringData {
    text: Box<str>,
    utf16_len: u32,
    is_ascii: bool,
}

/// Immutable, shared JavaScript string primitive
#[derive(Clone)]
pub struct JSString {
    inner: Rc<StringData>,
}

impl JSString {
    /// Create a string from UTF-8 text
    pub fn new(s: &str) -> Self {
        let is_ascii = s.is_ascii();
        let utf16_len = if is_ascii { s.len() } else { utf16_len(s) };
        JSString {
            inner: Rc::new(StringData {
                text: s.into(),
                utf16_len: utf16_len as u32,
                is_ascii,
            }),
        }
    }

    /// Get the string content as a str
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner.text
    }

    /// Get the string content as bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.text.as_bytes()
    }

    /// Byte length of the UTF-8 storage
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.inner.text.len()
    }

    /// Length in UTF-16 code units (the JS `length`)
    #[inline]
    pub fn utf16_len(&self) -> u32 {
        self.inner.utf16_len
    }

    /// Check if string is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.text.is_empty()
    }

    /// Check if string is ASCII-only
    #[inline]
    pub fn is_ascii(&self) -> bool {
        self.inner.is_ascii
    }

    /// Byte offset of the code point holding UTF-16 unit `index`.
    ///
    /// The flag is set when `index` names the second half of a surrogate
    /// pair; the offset then points at the start of that pair.
    pub fn char_pos(&self, index: u32) -> (usize, bool) {
        if self.is_ascii() {
            return ((index as usize).min(self.byte_len()), false);
        }
        utf16_to_utf8_index(self.as_str(), index as usize)
    }

    /// UTF-16 index of the code point starting at byte offset `offset`
    pub fn byte_offset_to_utf16_index(&self, offset: usize) -> u32 {
        if self.is_ascii() {
            return offset as u32;
        }
        utf8_to_utf16_index(self.as_str(), offset) as u32
    }

    /// Byte-level substring search starting at byte offset `from`.
    ///
    /// `from` must lie on a char boundary. Returns the byte offset of the
    /// first match; an empty needle matches at `from`.
    pub fn find_bytes(&self, from: usize, needle: &JSString) -> Option<usize> {
        let haystack = self.as_str().get(from..)?;
        haystack.find(needle.as_str()).map(|pos| pos + from)
    }
}

impl PartialEq for JSString {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) || self.as_str() == other.as_str()
    }
}

impl Eq for JSString {}

impl Hash for JSString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<&str> for JSString {
    fn from(s: &str) -> Self {
        JSString::new(s)
    }
}

impl From<String> for JSString {
    fn from(s: String) -> Self {
        JSString::new(&s)
    }
}

impl fmt::Debug for JSString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for JSString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if a property key is a valid array index (0 ..= 2^32 - 2)
#[inline]
pub fn is_array_index(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }

    // Fast path for single digits
    if s.len() == 1 {
        let b = s.as_bytes()[0];
        if b.is_ascii_digit() {
            return Some((b - b'0') as u32);
        }
        return None;
    }

    // Leading zeros are not valid (except "0")
    if s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    s.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}

/// Hash a property key for table lookup
#[inline]
pub fn hash_string(s: &str) -> u32 {
    let mut h: u32 = 0;
    for b in s.bytes() {
        h = h.wrapping_mul(31).wrapping_add(b as u32);
    }
    h
}
