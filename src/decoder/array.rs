use super::{ContentError, Decoder, Result};
use crate::value::{ArrayOptions, Value};

/// Reads a `(...)` array (§4.3).
pub(crate) fn parse_array(decoder: &mut Decoder<'_>) -> Result<Value> {
    debug_assert_eq!(decoder.peek(), Some(b'('));
    decoder.pos += 1;

    let mut options = ArrayOptions::empty();
    if decoder.peek() == Some(b'\n') {
        options.insert(ArrayOptions::BREAK_ELEMENTS_ONTO_LINES);
    }

    let mut elements = if decoder.skipping { None } else { Some(Vec::new()) };
    let mut trailing_comma = false;

    loop {
        decoder.skip_trivia()?;
        if decoder.peek() == Some(b')') {
            break;
        }

        let value = decoder.parse_value()?;
        if let Some(elements) = &mut elements {
            elements.push(value);
        }

        decoder.skip_trivia()?;
        if decoder.peek() == Some(b',') {
            decoder.pos += 1;
            if decoder.peek() == Some(b' ') {
                options.insert(ArrayOptions::SPACE_SEPARATOR);
            }
            trailing_comma = true;
        } else {
            trailing_comma = false;
            break;
        }
    }

    if decoder.peek() != Some(b')') {
        return Err(ContentError::MissingClosingParenthesis);
    }
    decoder.pos += 1;

    if trailing_comma {
        options.insert(ArrayOptions::TRAILING_COMMA);
    }

    Ok(Value::Array(elements.unwrap_or_default(), options))
}
