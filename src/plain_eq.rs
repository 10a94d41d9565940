//! A view over [`Value`](crate::Value) whose equality and hash ignore every
//! formatting option and dictionary key order — see §4.9 of the format this
//! crate implements.

use crate::value::{Dictionary, Value};
use std::hash::{Hash, Hasher};

/// Wraps a `&Value` so that `==` and hashing compare structure and content
/// only: same variant, string/data compared by bytes, arrays element-wise,
/// dictionaries as unordered key/value mappings. All `*Options` and
/// `Dictionary::order` are ignored.
#[derive(Debug, Clone, Copy)]
pub struct PlainValue<'a>(pub &'a Value);

impl<'a> PlainValue<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self(value)
    }
}

impl<'a> PartialEq for PlainValue<'a> {
    fn eq(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Value::String(a, _), Value::String(b, _)) => a == b,
            (Value::Data(a), Value::Data(b)) => a == b,
            (Value::Array(a, _), Value::Array(b, _)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| PlainValue(x) == PlainValue(y))
            }
            (Value::Dictionary(a), Value::Dictionary(b)) => plain_eq_dictionary(a, b),
            _ => false,
        }
    }
}

impl<'a> Eq for PlainValue<'a> {}

impl<'a> Hash for PlainValue<'a> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::String(s, _) => {
                0u8.hash(state);
                s.hash(state);
            }
            Value::Data(bytes) => {
                1u8.hash(state);
                bytes.hash(state);
            }
            Value::Array(values, _) => {
                2u8.hash(state);
                values.len().hash(state);
                for v in values {
                    PlainValue(v).hash(state);
                }
            }
            Value::Dictionary(dict) => {
                3u8.hash(state);
                dict.len().hash(state);
                // `iter_sorted` is always ascending-by-key regardless of
                // source order, so this is deterministic independent of how
                // the dictionary was built.
                for (key, value) in dict.iter_sorted() {
                    key.hash(state);
                    PlainValue(value).hash(state);
                }
            }
        }
    }
}

fn plain_eq_dictionary(a: &Dictionary, b: &Dictionary) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter_sorted()
        .zip(b.iter_sorted())
        .all(|((ak, av), (bk, bv))| ak == bk && PlainValue(av) == PlainValue(bv))
}

impl Value {
    /// Borrows `self` as a [`PlainValue`] for comparison or hashing that
    /// ignores formatting options and dictionary key order.
    pub fn as_plain(&self) -> PlainValue<'_> {
        PlainValue(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ArrayOptions, DictionaryBuilder, DictionaryOptions, Key, StringOptions};
    use crate::ByteString;

    #[test]
    fn string_options_do_not_affect_plain_equality() {
        let a = Value::String(ByteString::new("x"), StringOptions::UNQUOTED);
        let b = Value::String(ByteString::new("x"), StringOptions::empty());
        assert_eq!(a.as_plain(), b.as_plain());
    }

    #[test]
    fn array_options_do_not_affect_plain_equality() {
        let a = Value::Array(vec![Value::string("1")], ArrayOptions::TRAILING_COMMA);
        let b = Value::Array(vec![Value::string("1")], ArrayOptions::empty());
        assert_eq!(a.as_plain(), b.as_plain());
    }

    #[test]
    fn dictionary_order_does_not_affect_plain_equality() {
        let mut ascending = DictionaryBuilder::new();
        ascending.insert(Key::new("a"), Value::string("1"));
        ascending.insert(Key::new("b"), Value::string("2"));
        let ascending = ascending.finish(DictionaryOptions::empty());

        let mut non_ascending = DictionaryBuilder::new();
        non_ascending.insert(Key::new("b"), Value::string("2"));
        non_ascending.insert(Key::new("a"), Value::string("1"));
        let non_ascending = non_ascending.finish(DictionaryOptions::empty());

        assert!(non_ascending.order().is_some());
        assert_eq!(
            Value::Dictionary(ascending).as_plain(),
            Value::Dictionary(non_ascending).as_plain()
        );
    }

    #[test]
    fn different_variants_are_never_plain_equal() {
        assert_ne!(Value::string("1").as_plain(), Value::data(vec![1]).as_plain());
    }

    #[test]
    fn full_equality_implies_plain_equality() {
        let v = Value::string("x");
        assert_eq!(v, v.clone());
        assert_eq!(v.as_plain(), v.clone().as_plain());
    }
}
