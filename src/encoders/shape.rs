use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

use crate::errors::CodecError;

/// Representation requested for decoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// Fixed-size byte buffer.
    #[default]
    RawBytes,
    /// Growable byte buffer for further binary manipulation.
    OwnedBuffer,
    /// Bytes reinterpreted as UTF-8 text.
    Text,
    /// One integer in 0..=255 per byte, rendered as a number sequence.
    IntegerSequence,
}

impl OutputShape {
    pub fn all() -> [OutputShape; 4] {
        [
            OutputShape::RawBytes,
            OutputShape::OwnedBuffer,
            OutputShape::Text,
            OutputShape::IntegerSequence,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputShape::RawBytes => "raw_bytes",
            OutputShape::OwnedBuffer => "owned_buffer",
            OutputShape::Text => "text",
            OutputShape::IntegerSequence => "integer_sequence",
        }
    }

    /// Adapts a decoded byte buffer into this shape.
    pub fn adapt(self, bytes: Vec<u8>) -> Decoded {
        match self {
            OutputShape::RawBytes => Decoded::Raw(bytes.into_boxed_slice()),
            OutputShape::OwnedBuffer => Decoded::Buffer(bytes),
            // Invalid UTF-8 becomes U+FFFD, as platform text decoders do.
            OutputShape::Text => Decoded::Text(match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
            }),
            OutputShape::IntegerSequence => Decoded::Integers(bytes),
        }
    }
}

impl FromStr for OutputShape {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw_bytes" | "raw" | "uint8array" | "arraybuffer" => Ok(OutputShape::RawBytes),
            "owned_buffer" | "buffer" => Ok(OutputShape::OwnedBuffer),
            "text" | "string" => Ok(OutputShape::Text),
            "integer_sequence" | "integers" | "array" => Ok(OutputShape::IntegerSequence),
            _ => Err(CodecError::UnsupportedOutputShape(s.to_string())),
        }
    }
}

impl fmt::Display for OutputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OutputShape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Decoded bytes in the shape a caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Raw(Box<[u8]>),
    Buffer(Vec<u8>),
    Text(String),
    Integers(Vec<u8>),
}

impl Decoded {
    pub fn shape(&self) -> OutputShape {
        match self {
            Decoded::Raw(_) => OutputShape::RawBytes,
            Decoded::Buffer(_) => OutputShape::OwnedBuffer,
            Decoded::Text(_) => OutputShape::Text,
            Decoded::Integers(_) => OutputShape::IntegerSequence,
        }
    }

    /// Length in bytes; for `Text` this is the UTF-8 length after lossy conversion.
    pub fn len(&self) -> usize {
        match self {
            Decoded::Raw(bytes) => bytes.len(),
            Decoded::Buffer(bytes) => bytes.len(),
            Decoded::Text(text) => text.len(),
            Decoded::Integers(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the held bytes.
    ///
    /// For `Text` these are the UTF-8 bytes after lossy conversion, so any
    /// invalid sequence in the decoded input comes back as U+FFFD.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Decoded::Raw(bytes) => bytes.into_vec(),
            Decoded::Buffer(bytes) => bytes,
            Decoded::Text(text) => text.into_bytes(),
            Decoded::Integers(values) => values,
        }
    }
}
