//! The recursive-descent decoder: trivia/comment skipping, dispatch on the
//! leading byte, and the top-level entry points.

mod array;
mod data;
mod dictionary;
mod error;
mod string;

pub use error::{ContentError, DecodingError, Position};
pub(crate) use error::position_at;

use crate::byte_string::ByteString;
use crate::value::Value;
use std::collections::HashSet;
use tracing::{debug, trace};

type Result<T> = ::core::result::Result<T, ContentError>;

/// A byte cursor with the trivia/comment-skipping and dispatch logic shared
/// by every sub-parser.
pub(crate) struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    /// Set while parsing a value whose result will be discarded (§4.7):
    /// syntax is still fully validated, but leaf constructors build empty
    /// payloads instead of allocating proportionally to the skipped value.
    skipping: bool,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            skipping: false,
        }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Skips a run of ASCII whitespace, Unicode line/paragraph separators,
    /// and `//`/`/* */` comments.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(b) if crate::char_class::is_ascii_whitespace(b) => {
                    self.pos += 1;
                }
                Some(0xE2) if self.starts_with(&[0xE2, 0x80, 0xA8]) || self.starts_with(&[0xE2, 0x80, 0xA9]) => {
                    self.pos += 3;
                }
                Some(b'/') => {
                    self.skip_comment()?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// Skips ASCII whitespace only; never comments. Used inside `< … >`.
    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if crate::char_class::is_ascii_whitespace(b)) {
            self.pos += 1;
        }
    }

    fn skip_comment(&mut self) -> Result<()> {
        debug_assert_eq!(self.peek(), Some(b'/'));
        match self.peek_at(1) {
            None => {
                self.pos += 1;
                Err(ContentError::IncompleteCommentStart)
            }
            Some(b'/') => {
                self.pos += 2;
                while let Some(b) = self.peek() {
                    if matches!(b, b'\n' | b'\r') || (b == 0xE2 && (self.starts_with(&[0xE2, 0x80, 0xA8]) || self.starts_with(&[0xE2, 0x80, 0xA9]))) {
                        break;
                    }
                    self.pos += 1;
                }
                Ok(())
            }
            Some(b'*') => {
                self.pos += 2;
                loop {
                    if self.starts_with(b"*/") {
                        self.pos += 2;
                        return Ok(());
                    }
                    if self.bump().is_none() {
                        return Err(ContentError::MissingCommentEnd);
                    }
                }
            }
            Some(other) => {
                self.pos += 1;
                Err(ContentError::IllegalCommentStart { byte: other })
            }
        }
    }

    /// Parses one value, dispatching on the leading byte per §4.2.
    fn parse_value(&mut self) -> Result<Value> {
        self.skip_trivia()?;
        match self.peek() {
            Some(b'(') => {
                trace!(pos = self.pos, "array");
                array::parse_array(self)
            }
            Some(b'{') => {
                trace!(pos = self.pos, "dictionary");
                dictionary::parse_dictionary(self, None)
            }
            Some(b'"') | Some(b'\'') => {
                trace!(pos = self.pos, "quoted string");
                string::parse_quoted_string(self)
            }
            Some(b'<') => {
                trace!(pos = self.pos, "data");
                data::parse_data(self)
            }
            Some(b) if crate::char_class::is_unquoted_char(b) => {
                trace!(pos = self.pos, "unquoted string");
                string::parse_unquoted_string(self)
            }
            Some(other) => Err(ContentError::IllegalContent { byte: other }),
            None => Err(ContentError::MissingContent),
        }
    }

    fn to_decoding_error(&self, err: ContentError, raised_at: usize) -> DecodingError {
        DecodingError {
            source: err,
            position: position_at(self.input, raised_at),
        }
    }
}

fn parse_top_level_value(decoder: &mut Decoder<'_>, top_level_keys: Option<&HashSet<ByteString>>) -> Result<Value> {
    decoder.skip_trivia()?;
    match top_level_keys {
        None => decoder.parse_value(),
        Some(keys) => match decoder.peek() {
            Some(b'{') => dictionary::parse_dictionary(decoder, Some(keys)),
            Some(b) if crate::char_class::is_unquoted_char(b) || matches!(b, b'"' | b'\'' | b'(' | b'<') => {
                decoder.parse_value()
            }
            Some(other) => Err(ContentError::IllegalContent { byte: other }),
            None => Err(ContentError::MissingContent),
        },
    }
}

fn run_decode(input: &[u8], top_level_keys: Option<&HashSet<ByteString>>) -> ::core::result::Result<Value, DecodingError> {
    debug!(len = input.len(), "decode");
    let mut decoder = Decoder::new(input);
    let value = match parse_top_level_value(&mut decoder, top_level_keys) {
        Ok(v) => v,
        // Every sub-parser leaves the cursor at (or just past) the
        // offending byte before returning an error, so the position is
        // always derived from the cursor at the moment of failure.
        Err(e) => return Err(decoder.to_decoding_error(e, decoder.pos())),
    };
    if let Err(e) = decoder.skip_trivia() {
        return Err(decoder.to_decoding_error(e, decoder.pos()));
    }
    if decoder.pos() != input.len() {
        return Err(decoder.to_decoding_error(ContentError::OversuppliedContent, decoder.pos()));
    }
    Ok(value)
}

/// Decodes a complete document. Requires the whole input to be consumed
/// after one value (trailing trivia is allowed).
pub fn decode_all(input: &[u8]) -> ::core::result::Result<Value, DecodingError> {
    run_decode(input, None)
}

/// Decodes a complete document, but only materializes top-level dictionary
/// entries whose key is in `keys` (§4.7). Nested dictionaries under a
/// retained key are fully materialized. The input must still be a complete,
/// syntactically valid document; this only prunes what gets allocated.
pub fn decode_subtree(input: &[u8], keys: &HashSet<ByteString>) -> ::core::result::Result<Value, DecodingError> {
    run_decode(input, Some(keys))
}
