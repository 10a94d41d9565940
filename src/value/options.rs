//! Formatting-hint bitsets carried alongside value payloads.

/// Which named escape form, if any, was used (or should be used) for LF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFeedEscaping {
    /// `\n`
    Named,
    /// backslash followed by a literal line feed
    Literal,
    /// `\012`
    Octal,
}

bitflags::bitflags! {
    /// Formatting hints captured (or requested) for a `string` value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StringOptions: u8 {
        /// Emit without surrounding quotes.
        const UNQUOTED                      = 1 << 0;
        /// Prefer `\n` for line feeds.
        const ESCAPED_LINE_FEEDS_NAMED      = 1 << 1;
        /// Prefer backslash + literal line feed.
        const ESCAPED_LINE_FEEDS_LITERAL    = 1 << 2;
        /// Prefer `\012` for line feeds.
        const ESCAPED_LINE_FEEDS_OCTAL      = 1 << 3;
        /// Prefer `\011` for horizontal tabs.
        const ESCAPED_HORIZONTAL_TABS_OCTAL = 1 << 4;
    }
}

impl StringOptions {
    /// Which of the three mutually exclusive LF escaping forms is set, if any.
    ///
    /// Construction of a `StringOptions` from the decoder never sets more
    /// than one of the three LF flags; this is an invariant of the decoder,
    /// not re-checked here.
    pub fn line_feed_escaping(&self) -> Option<LineFeedEscaping> {
        if self.contains(StringOptions::ESCAPED_LINE_FEEDS_NAMED) {
            Some(LineFeedEscaping::Named)
        } else if self.contains(StringOptions::ESCAPED_LINE_FEEDS_LITERAL) {
            Some(LineFeedEscaping::Literal)
        } else if self.contains(StringOptions::ESCAPED_LINE_FEEDS_OCTAL) {
            Some(LineFeedEscaping::Octal)
        } else {
            None
        }
    }
}

bitflags::bitflags! {
    /// Formatting hints captured (or requested) for an `array` value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ArrayOptions: u8 {
        /// Put each element, and the closing `)`, on its own line.
        const BREAK_ELEMENTS_ONTO_LINES = 1 << 0;
        /// Emit a trailing `,` before the closing `)`.
        const TRAILING_COMMA            = 1 << 1;
        /// Emit a single space after each element separator.
        ///
        /// Ignored when `BREAK_ELEMENTS_ONTO_LINES` is set.
        const SPACE_SEPARATOR           = 1 << 2;
    }
}

bitflags::bitflags! {
    /// Formatting hints captured (or requested) for a `dictionary` value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DictionaryOptions: u8 {
        /// Put each entry, and the closing `}`, on its own line.
        const BREAK_ELEMENTS_ONTO_LINES = 1 << 0;
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{Deserialize, Serialize};

    macro_rules! serde_via_bits {
        ($ty:ty) => {
            impl Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                    self.bits().serialize(s)
                }
            }
            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                    let bits = u8::deserialize(d)?;
                    Ok(<$ty>::from_bits_truncate(bits))
                }
            }
        };
    }

    serde_via_bits!(StringOptions);
    serde_via_bits!(ArrayOptions);
    serde_via_bits!(DictionaryOptions);
}
