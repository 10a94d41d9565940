use super::key::Key;
use super::options::DictionaryOptions;
use super::Value;
use crate::byte_string::ByteString;
use std::collections::BTreeMap;

/// A `Key -> Value` mapping with optional explicit key order.
///
/// Internally the entries are kept sorted by key (`BTreeMap`), which is
/// exactly the fallback iteration order the encoder wants when no explicit
/// `order` was recorded. `order` is populated by the decoder only when the
/// keys, as first encountered, were **not** already ascending; see
/// [`Dictionary::from_entries`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: BTreeMap<ByteString, (Key, Value)>,
    order: Option<Vec<ByteString>>,
    pub options: DictionaryOptions,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or overwrites) an entry. On a repeated key, the later value
    /// wins and the key's recorded formatting options are replaced too; the
    /// key's position in `order`, if any, is unaffected by a later program-
    /// matic insert performed outside decoding (`order` is only maintained
    /// by the decoder's builder, see `DictionaryBuilder`).
    pub fn insert(&mut self, key: Key, value: Value) -> Option<Value> {
        self.entries
            .insert(key.string.clone(), (key, value))
            .map(|(_, v)| v)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).map(|(_, v)| v)
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&Key, &Value)> {
        self.entries.get(key).map(|(k, v)| (k, v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The explicit key order recorded by the decoder, if the source order
    /// was not already ascending. `None` means "iterate sorted ascending".
    pub fn order(&self) -> Option<&[ByteString]> {
        self.order.as_deref()
    }

    /// Entries in the order the encoder must use: explicit `order` if
    /// present, else ascending by key.
    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        let ordered: Option<Vec<(&Key, &Value)>> = self.order.as_ref().map(|order| {
            order
                .iter()
                .map(|k| {
                    let (key, value) = self
                        .entries
                        .get(k)
                        .expect("Dictionary::order must be a permutation of its keys");
                    (key, value)
                })
                .collect()
        });
        DictionaryIter {
            ordered,
            sorted: self.entries.values(),
            index: 0,
        }
    }

    /// Entries in ascending-by-key order, regardless of any explicit
    /// `order`. Used by the plain-equivalence view, which ignores order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = (&ByteString, &Value)> {
        self.entries.iter().map(|(k, (_, v))| (k, v))
    }

    /// Builds a dictionary directly from entries already known to be in
    /// ascending key order (`order` is left absent). Used by programmatic
    /// construction, not by the decoder.
    pub fn from_sorted_entries(entries: impl IntoIterator<Item = (Key, Value)>) -> Self {
        let mut dict = Self::new();
        for (key, value) in entries {
            dict.insert(key, value);
        }
        dict
    }
}

struct DictionaryIter<'a> {
    ordered: Option<Vec<(&'a Key, &'a Value)>>,
    sorted: std::collections::btree_map::Values<'a, ByteString, (Key, Value)>,
    index: usize,
}

impl<'a> Iterator for DictionaryIter<'a> {
    type Item = (&'a Key, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(ordered) = &self.ordered {
            let item = ordered.get(self.index).copied();
            self.index += 1;
            item
        } else {
            self.sorted.next().map(|(k, v)| (k, v))
        }
    }
}

/// Accumulates dictionary entries while decoding, tracking first-occurrence
/// key order so that [`Dictionary::order`] can be populated per §4.6: each
/// key contributes its position only the first time it is seen (a repeated
/// key updates the value in place, per "last write wins", without moving
/// its recorded position).
#[derive(Debug, Default)]
pub(crate) struct DictionaryBuilder {
    dict: Dictionary,
    first_seen_order: Vec<ByteString>,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: Key, value: Value) {
        if !self.dict.contains_key(key.string.as_str()) {
            self.first_seen_order.push(key.string.clone());
        }
        self.dict.insert(key, value);
    }

    pub fn finish(mut self, options: DictionaryOptions) -> Dictionary {
        let ascending = self
            .first_seen_order
            .windows(2)
            .all(|pair| pair[0] < pair[1]);
        self.dict.order = if ascending {
            None
        } else {
            Some(self.first_seen_order)
        };
        self.dict.options = options;
        self.dict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Key {
        Key::new(s)
    }

    fn string_value(s: &str) -> Value {
        Value::string(s)
    }

    #[test]
    fn ascending_keys_result_in_absent_order() {
        let mut builder = DictionaryBuilder::new();
        builder.insert(key("a"), string_value("1"));
        builder.insert(key("b"), string_value("2"));
        let dict = builder.finish(DictionaryOptions::empty());
        assert_eq!(dict.order(), None);
    }

    #[test]
    fn non_ascending_keys_are_recorded() {
        let mut builder = DictionaryBuilder::new();
        builder.insert(key("b"), string_value("1"));
        builder.insert(key("a"), string_value("2"));
        let dict = builder.finish(DictionaryOptions::empty());
        assert_eq!(
            dict.order().unwrap(),
            &[ByteString::new("b"), ByteString::new("a")]
        );
    }

    #[test]
    fn repeated_key_updates_value_but_keeps_first_position() {
        let mut builder = DictionaryBuilder::new();
        builder.insert(key("b"), string_value("1"));
        builder.insert(key("a"), string_value("2"));
        builder.insert(key("b"), string_value("3"));
        let dict = builder.finish(DictionaryOptions::empty());
        assert_eq!(
            dict.order().unwrap(),
            &[ByteString::new("b"), ByteString::new("a")]
        );
        assert_eq!(dict.get("b"), Some(&string_value("3")));
    }

    #[test]
    fn iter_without_order_is_ascending() {
        let mut dict = Dictionary::new();
        dict.insert(key("b"), string_value("2"));
        dict.insert(key("a"), string_value("1"));
        let keys: Vec<_> = dict.iter().map(|(k, _)| k.string.as_str().to_owned()).collect();
        assert_eq!(keys, vec!["a".to_owned(), "b".to_owned()]);
    }
}
