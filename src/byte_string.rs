//! An immutable, UTF-8 validated string with a cached "all ASCII" flag.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable UTF-8 string.
///
/// Equality and hashing operate on the UTF-8 byte form; ordering is
/// lexicographic over those same bytes, with a shorter string sorting
/// before any string it is a prefix of. The `is_ascii` flag is computed
/// once at construction and cached rather than recomputed on every access.
#[derive(Clone, Eq)]
pub struct ByteString {
    text: Box<str>,
    is_ascii: bool,
}

impl ByteString {
    /// Builds a `ByteString` from any owned or borrowed string.
    pub fn new(text: impl Into<Box<str>>) -> Self {
        let text = text.into();
        let is_ascii = text.is_ascii();
        Self { text, is_ascii }
    }

    /// Empty string constant-equivalent constructor.
    pub fn empty() -> Self {
        Self::new("")
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// `true` if every byte is `<= 0x7F`. Cached at construction time.
    #[inline]
    pub fn is_ascii(&self) -> bool {
        self.is_ascii
    }
}

impl PartialEq for ByteString {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl PartialEq<str> for ByteString {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl Hash for ByteString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for ByteString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteString {
    fn cmp(&self, other: &Self) -> Ordering {
        // `str`'s own `Ord` is already lexicographic over UTF-8 bytes.
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Borrow<str> for ByteString {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.text, f)
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.text, f)
    }
}

impl From<&str> for ByteString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ByteString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ByteString> for String {
    fn from(value: ByteString) -> Self {
        String::from(value.text)
    }
}

impl AsRef<str> for ByteString {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ByteString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ByteString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ByteString::new)
    }
}
