use super::options::StringOptions;
use crate::byte_string::ByteString;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A dictionary key: a string plus the formatting options it was (or should
/// be) written with.
///
/// Equality and hashing depend only on [`Key::string`] — `options` rides
/// along purely so a dictionary can re-emit a key the way it was quoted in
/// the source, without that quoting affecting whether two keys are "the
/// same" key. A lookup built from a bare string will match an entry whose
/// key was parsed out of a quoted literal.
#[derive(Debug, Clone)]
pub struct Key {
    pub string: ByteString,
    pub options: StringOptions,
}

impl Key {
    pub fn new(string: impl Into<ByteString>) -> Self {
        Self {
            string: string.into(),
            options: StringOptions::empty(),
        }
    }

    pub fn with_options(string: impl Into<ByteString>, options: StringOptions) -> Self {
        Self {
            string: string.into(),
            options,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.string.hash(state);
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.string.cmp(&other.string)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::new(value)
    }
}

impl From<ByteString> for Key {
    fn from(value: ByteString) -> Self {
        Key::new(value)
    }
}
