//! # base437
//!
//! See binary the way it wants to be seen: every byte becomes exactly one
//! printable character from the IBM PC code page 437 glyph set, and back.
//!
//! ```
//! use base437::{Codec, MappingTable, OutputShape, Decoded};
//!
//! let codec = Codec::default();
//! let encoded = codec.encode(b"\x00\x01Hello");
//! assert_eq!(encoded.chars().count(), 7);
//! assert_eq!(codec.decode(&encoded).unwrap(), b"\x00\x01Hello");
//!
//! // Remap '"' so output can sit inside an HTML attribute.
//! let html = MappingTable::default()
//!     .with_override(b'"', "U+201C")?
//!     .validate()?;
//! let codec = Codec::new(html);
//! assert_eq!(codec.encode("\"hi\""), "“hi“");
//! assert_eq!(
//!     codec.decode_as("“hi“", OutputShape::Text)?,
//!     Decoded::Text("\"hi\"".to_string())
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;
mod encoders;
mod errors;
pub mod prelude;

pub use crate::core::config::{
    DEFAULT_MAPPING, MappingConfig, MappingRegistry, Settings, export_mapping_document,
    import_mapping_document,
};
pub use crate::core::cp437::CP437;
pub use crate::core::mapping::{ByteKey, CodePoint, MappingTable};
pub use crate::encoders::codec::Codec;
pub use crate::encoders::locator::{BASE64_TAG, CODEC_TAG, DataLocator};
pub use crate::encoders::shape::{Decoded, OutputShape};
pub use crate::errors::{
    CodecError, ConfigError, MappingError, MappingNotFoundError, find_closest_mapping,
};

/// Encodes bytes with the default table.
pub fn encode(data: impl AsRef<[u8]>) -> String {
    Codec::default().encode(data)
}

/// Decodes text with the default table.
pub fn decode(encoded: &str) -> Result<Vec<u8>, CodecError> {
    Codec::default().decode(encoded)
}

/// Converts a `base437` data URL to a `base64` one using the default table.
pub fn to_standard_encoding(locator: &str) -> Result<String, CodecError> {
    Codec::default().to_standard_encoding(locator)
}
