//! Decoder and encoder for the OpenStep / NeXTSTEP ASCII property-list
//! format, preserving the formatting clues (quoting, escaping, key order,
//! line breaks) needed to round-trip a document byte-for-byte.
//!
//! ```
//! use openstep_plist::{decoder, encoder};
//!
//! let value = decoder::decode_all(b"{name = \"Alice\"; age = 30;}").unwrap();
//! let text = encoder::to_string(&value, &encoder::EncodingConfig::default());
//! assert!(text.contains("name"));
//! ```

mod accessors;
mod byte_string;
mod char_class;
pub mod decoder;
pub mod encoder;
mod plain_eq;
pub mod path_set;
mod value;

pub use byte_string::ByteString;
pub use decoder::{decode_all, decode_subtree, ContentError, DecodingError, Position};
pub use encoder::{encode, to_string, EncodingConfig, Indentation};
pub use plain_eq::PlainValue;
pub use value::{ArrayOptions, Dictionary, DictionaryOptions, Key, LineFeedEscaping, StringOptions, Value};
