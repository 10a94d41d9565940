use super::{ContentError, Decoder, Result};
use crate::value::Value;

fn hex_digit(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

/// Reads a `<hex hex ...>` literal (§4.5). Hex digits are case-insensitive
/// and may be separated by (but never inside a byte pair split by) runs of
/// whitespace; comments are not recognized here.
pub(crate) fn parse_data(decoder: &mut Decoder<'_>) -> Result<Value> {
    debug_assert_eq!(decoder.peek(), Some(b'<'));
    decoder.pos += 1;
    decoder.skip_whitespace();

    let mut bytes = if decoder.skipping { None } else { Some(Vec::new()) };

    loop {
        match decoder.peek() {
            Some(b'>') => {
                decoder.pos += 1;
                break;
            }
            Some(b) => {
                let high = hex_digit(b).ok_or(ContentError::NonHexadecimalHighByteData { byte: b })?;
                decoder.pos += 1;
                decoder.skip_whitespace();

                let low_byte = match decoder.peek() {
                    Some(b'>') | None => return Err(ContentError::MissingHexadecimalLowByteData),
                    Some(b) => b,
                };
                let low = hex_digit(low_byte).ok_or(ContentError::NonHexadecimalLowByteData { byte: low_byte })?;
                decoder.pos += 1;

                if let Some(bytes) = &mut bytes {
                    bytes.push((high << 4) | low);
                }
                decoder.skip_whitespace();
            }
            None => return Err(ContentError::MissingDataEnd),
        }
    }

    Ok(Value::Data(bytes.unwrap_or_default()))
}
