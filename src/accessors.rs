//! Typed projections and subscript operations over [`Value`] (§6).

use crate::byte_string::ByteString;
use crate::value::{Dictionary, Value};
use std::ops::Index;

impl Value {
    /// The payload if this is a `string`, else `None`.
    pub fn as_string(&self) -> Option<&ByteString> {
        match self {
            Value::String(s, _) => Some(s),
            _ => None,
        }
    }

    /// The payload if this is `data`, else `None`.
    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            Value::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// The payload if this is an `array`, else `None`.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(elements, _) => Some(elements),
            _ => None,
        }
    }

    /// The payload if this is a `dictionary`, else `None`.
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Looks up `key` in this value if it is a dictionary.
    ///
    /// The lookup key carries empty options, which is harmless since
    /// [`Key`] equality already ignores them.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_dictionary()?.get(key)
    }

    /// Indexes into this value's array payload, bounds-checked.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array()?.get(index)
    }
}

/// `value[key]` looks up a dictionary entry, panicking if `self` is not a
/// dictionary or the key is absent — mirrors `HashMap`'s `Index` contract.
/// Use [`Value::get`] for a non-panicking lookup.
impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or_else(|| panic!("no entry found for key {key:?}"))
    }
}

/// `value[i]` indexes a array payload, panicking out of bounds or on a
/// non-array. Use [`Value::get_index`] for a non-panicking lookup.
impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index)
            .unwrap_or_else(|| panic!("index {index} out of bounds"))
    }
}

impl Dictionary {
    /// Looks up an entry by a bare key, bypassing [`Key`] construction.
    pub fn get_by(&self, key: impl Into<ByteString>) -> Option<&Value> {
        let key: ByteString = key.into();
        self.get(key.as_str())
    }
}

impl Index<&str> for Dictionary {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or_else(|| panic!("no entry found for key {key:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{DictionaryBuilder, Key};

    fn sample_dict() -> Value {
        let mut builder = DictionaryBuilder::new();
        builder.insert(Key::new("a"), Value::string("1"));
        builder.insert(Key::new("b"), Value::array(vec![Value::string("x")]));
        Value::Dictionary(builder.finish(Default::default()))
    }

    #[test]
    fn as_string_matches_only_the_string_variant() {
        assert_eq!(Value::string("x").as_string().map(|s| s.as_str()), Some("x"));
        assert_eq!(Value::data(vec![1]).as_string(), None);
    }

    #[test]
    fn as_data_matches_only_the_data_variant() {
        assert_eq!(Value::data(vec![1, 2]).as_data(), Some(&[1u8, 2u8][..]));
        assert_eq!(Value::string("x").as_data(), None);
    }

    #[test]
    fn dictionary_get_finds_present_keys_and_misses_absent_ones() {
        let dict = sample_dict();
        assert!(dict.get("a").is_some());
        assert!(dict.get("missing").is_none());
    }

    #[test]
    fn dictionary_index_operator_panics_on_missing_key() {
        let dict = sample_dict();
        assert_eq!(dict["a"], Value::string("1"));
    }

    #[test]
    fn array_get_index_is_bounds_checked() {
        let v = Value::array(vec![Value::string("a"), Value::string("b")]);
        assert_eq!(v.get_index(0), Some(&Value::string("a")));
        assert_eq!(v.get_index(5), None);
    }

    #[test]
    fn array_index_operator_works_in_bounds() {
        let v = Value::array(vec![Value::string("a"), Value::string("b")]);
        assert_eq!(v[1], Value::string("b"));
    }

    #[test]
    #[should_panic]
    fn array_index_operator_panics_out_of_bounds() {
        let v = Value::array(vec![Value::string("a")]);
        let _ = v[5];
    }
}
