//! Formatting-driven serialization (§4.8): turns a [`Value`] back into
//! text, honoring the formatting options captured on it and a caller-
//! supplied indentation configuration.

use crate::byte_string::ByteString;
use crate::char_class::is_unquoted_char;
use crate::value::{ArrayOptions, Dictionary, DictionaryOptions, LineFeedEscaping, StringOptions, Value};
use std::fmt::Write as _;
use tracing::trace;

/// How nested levels are indented when an array or dictionary breaks its
/// elements onto separate lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    Spaces(usize),
    Tabs,
    None,
}

/// Encoder configuration: indentation style and the starting indent depth.
///
/// `level` is incremented automatically for nested arrays/dictionaries;
/// callers encoding a whole document normally start at `level: 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingConfig {
    pub indentation: Indentation,
    pub level: usize,
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self {
            indentation: Indentation::None,
            level: 0,
        }
    }
}

impl EncodingConfig {
    pub fn new(indentation: Indentation) -> Self {
        Self { indentation, level: 0 }
    }

    fn nested(&self) -> Self {
        Self {
            indentation: self.indentation,
            level: self.level + 1,
        }
    }

    fn write_indent(&self, sink: &mut String) {
        match self.indentation {
            Indentation::None => {}
            Indentation::Tabs => {
                for _ in 0..self.level {
                    sink.push('\t');
                }
            }
            Indentation::Spaces(n) => {
                for _ in 0..self.level {
                    for _ in 0..n {
                        sink.push(' ');
                    }
                }
            }
        }
    }
}

/// Encodes `value` into `sink` per `config`. Never fails: the only
/// programming error this can surface is a panic if a dictionary's
/// recorded `order` is not a permutation of its own keys, which cannot
/// happen for a dictionary produced by this crate's decoder.
pub fn encode(value: &Value, sink: &mut String, config: &EncodingConfig) {
    match value {
        Value::String(s, options) => encode_string(sink, s, *options),
        Value::Data(bytes) => encode_data(sink, bytes),
        Value::Array(elements, options) => encode_array(sink, elements, *options, config),
        Value::Dictionary(dict) => encode_dictionary(sink, dict, config),
    }
}

/// Convenience wrapper around [`encode`] that returns a fresh `String`.
pub fn to_string(value: &Value, config: &EncodingConfig) -> String {
    let mut sink = String::new();
    encode(value, &mut sink, config);
    sink
}

fn encode_string(sink: &mut String, s: &ByteString, options: StringOptions) {
    if options.contains(StringOptions::UNQUOTED) && !s.is_empty() && s.as_bytes().iter().all(|&b| is_unquoted_char(b)) {
        sink.push_str(s.as_str());
        return;
    }

    sink.push('"');
    let mut chars = s.as_str().chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\t' => {
                if options.contains(StringOptions::ESCAPED_HORIZONTAL_TABS_OCTAL) {
                    sink.push_str("\\011");
                } else {
                    sink.push('\t');
                }
            }
            '\\' => sink.push_str("\\\\"),
            '"' => sink.push_str("\\\""),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                push_line_feed_escape(sink, options);
            }
            '\n' => push_line_feed_escape(sink, options),
            other => sink.push(other),
        }
    }
    sink.push('"');
}

fn push_line_feed_escape(sink: &mut String, options: StringOptions) {
    match options.line_feed_escaping() {
        Some(LineFeedEscaping::Named) => sink.push_str("\\n"),
        Some(LineFeedEscaping::Literal) => sink.push_str("\\\n"),
        Some(LineFeedEscaping::Octal) => sink.push_str("\\012"),
        None => sink.push('\n'),
    }
}

fn encode_data(sink: &mut String, bytes: &[u8]) {
    sink.push('<');
    for b in bytes {
        let _ = write!(sink, "{:02x}", b);
    }
    sink.push('>');
}

fn encode_array(sink: &mut String, elements: &[Value], options: ArrayOptions, config: &EncodingConfig) {
    trace!(len = elements.len(), "encode array");
    let break_lines = options.contains(ArrayOptions::BREAK_ELEMENTS_ONTO_LINES);
    let inner = config.nested();

    sink.push('(');
    if break_lines {
        sink.push('\n');
    }

    for (i, element) in elements.iter().enumerate() {
        if i > 0 {
            sink.push(',');
            if break_lines {
                sink.push('\n');
            } else if options.contains(ArrayOptions::SPACE_SEPARATOR) {
                sink.push(' ');
            }
        }
        if break_lines {
            inner.write_indent(sink);
        }
        encode(element, sink, &inner);
    }

    if !elements.is_empty() {
        if options.contains(ArrayOptions::TRAILING_COMMA) {
            sink.push(',');
        }
        if break_lines {
            sink.push('\n');
        }
    }
    if break_lines {
        config.write_indent(sink);
    }
    sink.push(')');
}

fn encode_dictionary(sink: &mut String, dict: &Dictionary, config: &EncodingConfig) {
    trace!(len = dict.len(), "encode dictionary");
    let break_lines = dict.options.contains(DictionaryOptions::BREAK_ELEMENTS_ONTO_LINES);
    let inner = config.nested();

    sink.push('{');
    if break_lines {
        sink.push('\n');
    }

    for (key, value) in dict.iter() {
        if break_lines {
            inner.write_indent(sink);
        }
        encode_string(sink, &key.string, key.options);
        sink.push_str(" = ");
        encode(value, sink, &inner);
        sink.push(';');
        if break_lines {
            sink.push('\n');
        }
    }

    if break_lines {
        config.write_indent(sink);
    }
    sink.push('}');
}
