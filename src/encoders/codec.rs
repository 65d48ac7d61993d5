use std::sync::Arc;

use crate::core::mapping::MappingTable;
use crate::encoders::shape::{Decoded, OutputShape};
use crate::errors::CodecError;

/// Encoder/decoder bound to one [`MappingTable`].
///
/// Every byte becomes exactly one character and every character exactly one
/// byte, so positions line up one-to-one between input and output. A codec
/// holds no mutable state and can be cloned and shared across threads; clones
/// share the same table.
#[derive(Debug, Clone)]
pub struct Codec {
    table: Arc<MappingTable>,
}

impl Codec {
    /// Binds a codec to a table.
    ///
    /// For round-trip guarantees the table should have passed
    /// [`MappingTable::validate`].
    pub fn new(table: impl Into<Arc<MappingTable>>) -> Self {
        Codec {
            table: table.into(),
        }
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Encodes bytes, or text via its UTF-8 bytes, one character per byte.
    ///
    /// # Example
    /// ```
    /// use base437::Codec;
    ///
    /// let codec = Codec::default();
    /// assert_eq!(codec.encode(b"\x01Hi"), "☺Hi");
    /// ```
    pub fn encode(&self, input: impl AsRef<[u8]>) -> String {
        let bytes = input.as_ref();
        let mut result = String::with_capacity(bytes.len() * 3);
        for &byte in bytes {
            result.push(self.table.point(byte));
        }
        result
    }

    /// Encodes a sequence of integers, each of which must be a byte value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidByte`] for the first value above 255.
    pub fn encode_integers(&self, values: &[u32]) -> Result<String, CodecError> {
        let mut result = String::with_capacity(values.len() * 3);
        for (position, &value) in values.iter().enumerate() {
            let byte =
                u8::try_from(value).map_err(|_| CodecError::InvalidByte { value, position })?;
            result.push(self.table.point(byte));
        }
        Ok(result)
    }

    /// Decodes text back to bytes, one byte per Unicode scalar value.
    ///
    /// Decoding stops at the first character the table does not know; no
    /// partial output is returned.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidCharacterAt`] with the character index
    /// (not the UTF-8 byte offset) of the offending character.
    pub fn decode(&self, input: &str) -> Result<Vec<u8>, CodecError> {
        let mut result = Vec::with_capacity(input.len());
        for (position, character) in input.chars().enumerate() {
            let byte = self
                .table
                .byte(character)
                .ok_or(CodecError::InvalidCharacterAt {
                    position,
                    character,
                })?;
            result.push(byte);
        }
        Ok(result)
    }

    /// Decodes text and adapts the bytes to the requested output shape.
    pub fn decode_as(&self, input: &str, shape: OutputShape) -> Result<Decoded, CodecError> {
        Ok(shape.adapt(self.decode(input)?))
    }

    /// Decodes text into an output shape named by string, such as `"text"`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedOutputShape`] before decoding if the
    /// name is unknown.
    pub fn decode_to(&self, input: &str, shape: &str) -> Result<Decoded, CodecError> {
        let shape: OutputShape = shape.parse()?;
        self.decode_as(input, shape)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Codec::new(MappingTable::shared_default())
    }
}
