use super::{ContentError, Decoder, Result};
use crate::byte_string::ByteString;
use crate::value::{DictionaryBuilder, DictionaryOptions, Key, Value};
use std::collections::HashSet;

/// Reads a `{...}` dictionary (§4.6).
///
/// When `top_level_keys` is `Some`, only entries whose key is in the set
/// are materialized (§4.7) — every entry is still fully parsed and
/// syntax-validated, but a discarded entry's value is built with
/// [`Decoder::skipping`] set, so leaf payloads stay empty.
pub(crate) fn parse_dictionary(decoder: &mut Decoder<'_>, top_level_keys: Option<&HashSet<ByteString>>) -> Result<Value> {
    debug_assert_eq!(decoder.peek(), Some(b'{'));
    decoder.pos += 1;

    let mut options = DictionaryOptions::empty();
    if decoder.peek() == Some(b'\n') {
        options.insert(DictionaryOptions::BREAK_ELEMENTS_ONTO_LINES);
    }

    let mut builder = DictionaryBuilder::new();

    loop {
        decoder.skip_trivia()?;
        if decoder.peek() == Some(b'}') {
            break;
        }

        let key_value = decoder.parse_value()?;
        let (key_string, key_options) = match key_value {
            Value::String(s, opts) => (s, opts),
            _ => return Err(ContentError::NonStringKey),
        };

        decoder.skip_trivia()?;
        if decoder.peek() != Some(b'=') {
            return Err(ContentError::MissingEqualSignInDictionary);
        }
        decoder.pos += 1;
        decoder.skip_trivia()?;

        let retained = top_level_keys.is_none_or_contains(&key_string);
        let outer_skipping = decoder.skipping;
        if top_level_keys.is_some() {
            decoder.skipping = outer_skipping || !retained;
        }
        let value = decoder.parse_value();
        decoder.skipping = outer_skipping;
        let value = value?;

        decoder.skip_trivia()?;
        if decoder.peek() != Some(b';') {
            return Err(ContentError::MissingSemicolonInDictionary);
        }
        decoder.pos += 1;
        decoder.skip_trivia()?;

        if retained {
            builder.insert(Key::with_options(key_string, key_options), value);
        }
    }

    if decoder.peek() != Some(b'}') {
        return Err(ContentError::MissingClosingBrace);
    }
    decoder.pos += 1;

    Ok(Value::Dictionary(builder.finish(options)))
}

trait TopLevelKeysExt {
    fn is_none_or_contains(&self, key: &ByteString) -> bool;
}

impl TopLevelKeysExt for Option<&HashSet<ByteString>> {
    fn is_none_or_contains(&self, key: &ByteString) -> bool {
        match self {
            None => true,
            Some(keys) => keys.contains(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_all;
    use crate::decoder::decode_subtree;
    use crate::value::Dictionary;

    fn decode(input: &str) -> Value {
        decode_all(input.as_bytes()).unwrap_or_else(|e| panic!("{input:?} failed to decode: {e}"))
    }

    #[test]
    fn ascending_keys_have_no_explicit_order() {
        let v = decode("{a = 1; b = 2;}");
        match v {
            Value::Dictionary(dict) => assert_eq!(dict.order(), None),
            _ => panic!("expected dictionary"),
        }
    }

    #[test]
    fn non_ascending_keys_keep_explicit_order() {
        let v = decode("{b = 1; a = 2;}");
        match v {
            Value::Dictionary(dict) => assert_eq!(
                dict.order().unwrap(),
                &[ByteString::new("b"), ByteString::new("a")]
            ),
            _ => panic!("expected dictionary"),
        }
    }

    #[test]
    fn non_string_key_is_an_error() {
        let err = decode_all(b"{() = value;}").unwrap_err();
        assert_eq!(err.source, ContentError::NonStringKey);
    }

    #[test]
    fn missing_equal_sign_is_an_error() {
        let err = decode_all(b"{a 1;}").unwrap_err();
        assert_eq!(err.source, ContentError::MissingEqualSignInDictionary);
    }

    #[test]
    fn missing_semicolon_is_an_error() {
        let err = decode_all(b"{a = 1}").unwrap_err();
        assert_eq!(err.source, ContentError::MissingSemicolonInDictionary);
    }

    #[test]
    fn repeated_key_keeps_the_later_value() {
        let v = decode("{a = 1; a = 2;}");
        match v {
            Value::Dictionary(dict) => {
                assert_eq!(dict.get("a"), Some(&Value::string("2")));
                assert_eq!(dict.len(), 1);
            }
            _ => panic!("expected dictionary"),
        }
    }

    #[test]
    fn subtree_decoding_only_materializes_selected_top_level_keys() {
        let keys: HashSet<ByteString> = [ByteString::new("keep")].into_iter().collect();
        let v = decode_subtree(b"{keep = { inner = 1; }; drop = (1, 2, 3);}", &keys).unwrap();
        let Value::Dictionary(dict) = v else { panic!("expected dictionary") };
        assert!(dict.contains_key("keep"));
        assert!(!dict.contains_key("drop"));
        match dict.get("keep").unwrap() {
            Value::Dictionary(inner) => assert_eq!(inner.get("inner"), Some(&Value::string("1"))),
            _ => panic!("expected nested dictionary to be fully materialized"),
        }
    }

    #[test]
    fn subtree_decoding_still_validates_syntax_of_dropped_entries() {
        let keys: HashSet<ByteString> = [ByteString::new("keep")].into_iter().collect();
        let err = decode_subtree(b"{keep = 1; drop = (1, 2;}", &keys).unwrap_err();
        assert_eq!(err.source, ContentError::MissingClosingParenthesis);
    }

    #[test]
    fn empty_dictionary() {
        assert_eq!(decode("{}"), Value::Dictionary(Dictionary::new()));
    }
}
