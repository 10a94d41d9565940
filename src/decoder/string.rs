use super::{ContentError, Decoder, Result};
use crate::byte_string::ByteString;
use crate::char_class::is_unquoted_char;
use crate::value::{StringOptions, Value};

/// Reads the maximal run of unquoted-literal bytes (§4.4) starting at the
/// cursor, which the caller has already confirmed is non-empty.
pub(crate) fn parse_unquoted_string(decoder: &mut Decoder<'_>) -> Result<Value> {
    let start = decoder.pos;
    while matches!(decoder.peek(), Some(b) if is_unquoted_char(b)) {
        decoder.pos += 1;
    }
    let string = if decoder.skipping {
        ByteString::empty()
    } else {
        let raw = &decoder.input[start..decoder.pos];
        // Every byte in the unquoted-literal class is ASCII.
        ByteString::new(std::str::from_utf8(raw).expect("unquoted literal bytes are ASCII"))
    };
    Ok(Value::String(string, StringOptions::UNQUOTED))
}

/// Reads a `"..."` or `'...'` literal, interpreting escapes per §4.4.
pub(crate) fn parse_quoted_string(decoder: &mut Decoder<'_>) -> Result<Value> {
    let quote = decoder.bump().expect("caller checked for an opening quote byte");
    let mut buf = if decoder.skipping { None } else { Some(String::new()) };
    let mut options = StringOptions::empty();

    loop {
        let start = decoder.pos;
        while let Some(b) = decoder.peek() {
            if b == quote || b == b'\\' {
                break;
            }
            decoder.pos += 1;
        }
        if decoder.pos > start {
            let raw = &decoder.input[start..decoder.pos];
            match std::str::from_utf8(raw) {
                Ok(s) => {
                    if let Some(buf) = &mut buf {
                        buf.push_str(s);
                    }
                }
                Err(_) => return Err(ContentError::NonUTF8StringContents),
            }
        }

        match decoder.peek() {
            Some(b) if b == quote => {
                decoder.pos += 1;
                break;
            }
            Some(b'\\') => {
                decoder.pos += 1;
                let c = parse_escape(decoder, &mut options)?;
                if let Some(buf) = &mut buf {
                    buf.push(c);
                }
            }
            _ => return Err(ContentError::MissingClosingQuote),
        }
    }

    let string = buf.map(ByteString::new).unwrap_or_else(ByteString::empty);
    Ok(Value::String(string, options))
}

fn parse_escape(decoder: &mut Decoder<'_>, options: &mut StringOptions) -> Result<char> {
    let Some(b) = decoder.bump() else {
        return Err(ContentError::MissingClosingQuote);
    };
    match b {
        b'\\' => Ok('\\'),
        b'a' => Ok('\u{0007}'),
        b'b' => Ok('\u{0008}'),
        b'e' => Ok('\u{001B}'),
        b'f' => Ok('\u{000C}'),
        b'n' => {
            options.insert(StringOptions::ESCAPED_LINE_FEEDS_NAMED);
            Ok('\n')
        }
        b'r' => Ok('\r'),
        b't' => Ok('\t'),
        b'v' => Ok('\u{000B}'),
        b'\n' => {
            options.insert(StringOptions::ESCAPED_LINE_FEEDS_LITERAL);
            Ok('\n')
        }
        b'0'..=b'7' => parse_octal_escape(decoder, b, options),
        b'U' => parse_hex_escape(decoder),
        other => Ok(other as char),
    }
}

fn octal_digit(b: u8) -> Option<u8> {
    if (b'0'..=b'7').contains(&b) {
        Some(b - b'0')
    } else {
        None
    }
}

fn parse_octal_escape(decoder: &mut Decoder<'_>, first: u8, options: &mut StringOptions) -> Result<char> {
    let d1 = octal_digit(first).expect("caller matched an octal digit");
    let mut next_digit = || -> Option<u8> {
        let d = decoder.peek().and_then(octal_digit)?;
        decoder.pos += 1;
        Some(d)
    };
    let d2 = next_digit();
    let d3 = if d2.is_some() { next_digit() } else { None };

    if d2.is_some() && d3.is_some() && d1 >= 4 {
        return Err(ContentError::OctalCodeOverflowStringEscapeSequence {
            d1,
            d2: d2.unwrap(),
            d3: d3.unwrap(),
        });
    }
    if d2.is_some() && d3.is_some() && d1 >= 2 {
        return Err(ContentError::NonASCIIOctalCodeStringEscapeSequence {
            d1,
            d2: d2.unwrap_or(0),
            d3: d3.unwrap_or(0),
        });
    }

    let mut value: u32 = d1 as u32;
    if let Some(d2) = d2 {
        value = (value << 3) | d2 as u32;
    }
    if let Some(d3) = d3 {
        value = (value << 3) | d3 as u32;
    }

    if value == 0o011 {
        options.insert(StringOptions::ESCAPED_HORIZONTAL_TABS_OCTAL);
    } else if value == 0o012 {
        options.insert(StringOptions::ESCAPED_LINE_FEEDS_OCTAL);
    }

    Ok(char::from_u32(value).expect("octal escape value is always < 0x80"))
}

fn parse_hex_escape(decoder: &mut Decoder<'_>) -> Result<char> {
    let mut value: u32 = 0;
    for _ in 0..4 {
        let b = decoder
            .peek()
            .ok_or(ContentError::IncompleteHexadecimalCodeStringEscapeSequence)?;
        let digit = (b as char)
            .to_digit(16)
            .ok_or(ContentError::IncompleteHexadecimalCodeStringEscapeSequence)?;
        value = (value << 4) | digit;
        decoder.pos += 1;
    }
    if (0xD800..=0xDFFF).contains(&value) {
        return Err(ContentError::NonUnicodeScalarHexadecimalCodeStringEscapeSequence { value: value as u16 });
    }
    Ok(char::from_u32(value).expect("surrogate range was rejected above"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode_all;

    fn decode_str(input: &str) -> Value {
        decode_all(input.as_bytes()).unwrap_or_else(|e| panic!("{input:?} failed to decode: {e}"))
    }

    #[test]
    fn unquoted_literal() {
        assert_eq!(decode_str("abc123"), Value::String(ByteString::new("abc123"), StringOptions::UNQUOTED));
    }

    #[test]
    fn octal_escape_builds_ascii_then_literal_continues() {
        let v = decode_str(r#""\141bc""#);
        assert_eq!(v, Value::String(ByteString::new("abc"), StringOptions::empty()));
    }

    #[test]
    fn hex_escape() {
        let v = decode_str(r#""\U0061bc""#);
        assert_eq!(v, Value::String(ByteString::new("abc"), StringOptions::empty()));
    }

    #[test]
    fn non_ascii_octal_escape_is_rejected() {
        let err = decode_all(br#""\200""#).unwrap_err();
        assert_eq!(
            err.source,
            ContentError::NonASCIIOctalCodeStringEscapeSequence { d1: 2, d2: 0, d3: 0 }
        );
    }

    #[test]
    fn short_octal_escape_with_high_first_digit_is_still_ascii() {
        // Only three-digit escapes are checked for an out-of-ASCII-range
        // first digit; a 1- or 2-digit escape's value never exceeds 0o77.
        assert_eq!(decode_str(r#""\40""#), Value::String(ByteString::new(" "), StringOptions::empty()));
        let v = decode_str(r#""\7""#);
        assert_eq!(v, Value::String(ByteString::new("\u{0007}"), StringOptions::empty()));
    }

    #[test]
    fn overflowing_octal_escape_is_rejected() {
        let err = decode_all(br#""\400""#).unwrap_err();
        assert_eq!(
            err.source,
            ContentError::OctalCodeOverflowStringEscapeSequence { d1: 4, d2: 0, d3: 0 }
        );
    }

    #[test]
    fn surrogate_hex_escape_is_rejected() {
        let err = decode_all(br#""\UD800""#).unwrap_err();
        assert_eq!(
            err.source,
            ContentError::NonUnicodeScalarHexadecimalCodeStringEscapeSequence { value: 0xD800 }
        );
    }

    #[test]
    fn named_line_feed_escape_sets_option() {
        let v = decode_str(r#""some\nword""#);
        match v {
            Value::String(s, opts) => {
                assert_eq!(s.as_str(), "some\nword");
                assert!(opts.contains(StringOptions::ESCAPED_LINE_FEEDS_NAMED));
            }
            _ => panic!("expected string"),
        }
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = decode_all(br#""abc"#).unwrap_err();
        assert_eq!(err.source, ContentError::MissingClosingQuote);
    }

    #[test]
    fn overlong_utf8_is_rejected() {
        // Overlong encoding of U+0000
        let err = decode_all(b"\"\xC0\x80\"").unwrap_err();
        assert_eq!(err.source, ContentError::NonUTF8StringContents);
    }

    #[test]
    fn surrogate_encoded_utf8_is_rejected() {
        let err = decode_all(b"\"\xED\xA0\x80\"").unwrap_err();
        assert_eq!(err.source, ContentError::NonUTF8StringContents);
    }
}
