use std::fmt;
use std::io;

use crate::core::mapping::CodePoint;

/// Errors raised while building or checking a [`MappingTable`](crate::MappingTable).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    /// The key does not name one of the 256 byte values.
    #[error("invalid byte key '{0}': expected a value in 0..=255")]
    InvalidByte(String),
    /// The replacement target is not of the form `U+XXXX`.
    #[error("malformed code point literal '{0}': expected U+XXXX with exactly 4 hex digits")]
    MalformedCodePointLiteral(String),
    /// Two bytes target the same code point, so decoding would be ambiguous.
    #[error("duplicate code point {point}: claimed by byte {first} and byte {second}")]
    DuplicateCodePoint {
        point: CodePoint,
        first: u8,
        second: u8,
    },
}

/// Errors raised by [`Codec`](crate::Codec) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// An integer presented for encoding does not fit in a byte.
    #[error("invalid byte value {value} at position {position}: must be between 0 and 255")]
    InvalidByte { value: u32, position: usize },
    /// A character in the input has no byte in the active table.
    #[error("invalid base437 character '{character}' ({}) at position {position}", CodePoint::from(.character))]
    InvalidCharacterAt { position: usize, character: char },
    /// The requested output shape is not one the codec knows.
    #[error("unsupported output shape '{0}': use raw_bytes, owned_buffer, text or integer_sequence")]
    UnsupportedOutputShape(String),
    /// The input is not shaped like `data:<mimetype>;<tag>,<payload>`.
    #[error("input is not a data URL of the form data:<mimetype>;<tag>,<payload>")]
    NotADataLocator,
    /// The data URL carries a different codec tag than the one expected.
    #[error("data URL is tagged '{found}', expected '{expected}'")]
    WrongCodecTag {
        expected: &'static str,
        found: String,
    },
    /// The base64 payload of a data URL could not be decoded.
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Errors raised while loading mapping presets and documents.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to parse mapping presets: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("failed to read mapping document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    NotFound(#[from] MappingNotFoundError),
    #[error("invalid mapping '{name}': {source}")]
    Mapping {
        name: String,
        #[source]
        source: MappingError,
    },
}

/// Error when a mapping preset is not found
#[derive(Debug)]
pub struct MappingNotFoundError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl MappingNotFoundError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl fmt::Display for MappingNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mapping '{}' not found", self.name)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{}'?)", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MappingNotFoundError {}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest matching preset name, if any is within a small edit distance.
pub fn find_closest_mapping(name: &str, available: &[String]) -> Option<String> {
    let threshold = if name.len() < 5 { 2 } else { 3 };

    available
        .iter()
        .map(|candidate| (levenshtein_distance(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= threshold)
        .min_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)))
        .map(|(_, candidate)| candidate.clone())
}
