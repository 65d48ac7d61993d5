use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::cp437::CP437;
use crate::errors::MappingError;

static DEFAULT_TABLE: LazyLock<Arc<MappingTable>> =
    LazyLock::new(|| Arc::new(MappingTable::from_points(CP437)));

/// A Unicode scalar value, written as `U+XXXX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodePoint(char);

impl CodePoint {
    pub fn new(c: char) -> Self {
        CodePoint(c)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn value(self) -> u32 {
        self.0 as u32
    }

    /// Parses the `U+XXXX` literal form.
    ///
    /// The marker is `U+` (or `u+`) followed by exactly four hex digits in
    /// either case. Surrogates are rejected since they are not scalar values.
    pub fn parse_literal(literal: &str) -> Result<Self, MappingError> {
        let malformed = || MappingError::MalformedCodePointLiteral(literal.to_string());

        let digits = literal
            .strip_prefix("U+")
            .or_else(|| literal.strip_prefix("u+"))
            .ok_or_else(malformed)?;

        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let value = u32::from_str_radix(digits, 16).map_err(|_| malformed())?;
        char::from_u32(value).map(CodePoint).ok_or_else(malformed)
    }
}

impl From<char> for CodePoint {
    fn from(c: char) -> Self {
        CodePoint(c)
    }
}

impl From<&char> for CodePoint {
    fn from(c: &char) -> Self {
        CodePoint(*c)
    }
}

impl FromStr for CodePoint {
    type Err = MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_literal(s)
    }
}

impl fmt::Display for CodePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U+{:04X}", self.value())
    }
}

impl Serialize for CodePoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Boundary conversions from user-facing keys to the canonical `u8` byte key.
///
/// Tables are always keyed by byte value. Callers that hold a decimal string
/// or a single ASCII character convert explicitly through one of these.
pub struct ByteKey;

impl ByteKey {
    /// Parses a canonical decimal byte value such as `"34"`.
    ///
    /// Whitespace, signs and leading zeros are rejected so that each byte has
    /// exactly one spelling and two keys can never name the same byte.
    pub fn parse_decimal(key: &str) -> Result<u8, MappingError> {
        let canonical = !key.is_empty()
            && key.bytes().all(|b| b.is_ascii_digit())
            && (key == "0" || !key.starts_with('0'));
        if !canonical {
            return Err(MappingError::InvalidByte(key.to_string()));
        }
        key.parse::<u8>()
            .map_err(|_| MappingError::InvalidByte(key.to_string()))
    }

    /// Converts a single ASCII character such as `'"'` to its byte value.
    pub fn from_ascii(c: char) -> Result<u8, MappingError> {
        if c.is_ascii() {
            Ok(c as u8)
        } else {
            Err(MappingError::InvalidByte(c.to_string()))
        }
    }
}

/// An immutable, total mapping from the 256 byte values to Unicode characters.
///
/// Tables are values: [`with_override`](Self::with_override) derives a new
/// table and never touches the receiver. Injectivity is not enforced on
/// construction; call [`validate`](Self::validate) before relying on
/// round-trips through a customized table.
#[derive(Debug, Clone)]
pub struct MappingTable {
    byte_to_point: [char; 256],
    point_to_byte: HashMap<char, u8>,
}

impl MappingTable {
    /// Returns the shared, process-wide default table.
    pub fn shared_default() -> Arc<MappingTable> {
        Arc::clone(&DEFAULT_TABLE)
    }

    fn from_points(byte_to_point: [char; 256]) -> Self {
        // Later bytes win when points collide; validate() reports collisions.
        let point_to_byte = byte_to_point
            .iter()
            .enumerate()
            .map(|(byte, &point)| (point, byte as u8))
            .collect();

        MappingTable {
            byte_to_point,
            point_to_byte,
        }
    }

    /// Derives a table mapping `byte` to the code point named by `literal`.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MalformedCodePointLiteral`] if `literal` is not
    /// of the form `U+XXXX`. The receiver is unchanged either way.
    pub fn with_override(&self, byte: u8, literal: &str) -> Result<Self, MappingError> {
        let point = CodePoint::parse_literal(literal)?;
        Ok(self.with_override_point(byte, point))
    }

    /// Derives a table mapping `byte` to an already parsed code point.
    pub fn with_override_point(&self, byte: u8, point: CodePoint) -> Self {
        tracing::trace!(byte, %point, "overriding mapping entry");

        let mut points = self.byte_to_point;
        points[byte as usize] = point.as_char();
        Self::from_points(points)
    }

    /// Checks that no two bytes share a code point.
    ///
    /// Scans bytes in ascending order and reports the first code point that
    /// an earlier byte already claimed.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::DuplicateCodePoint`] naming the shared point
    /// and both bytes.
    pub fn validate(&self) -> Result<Self, MappingError> {
        let mut seen: HashMap<char, u8> = HashMap::with_capacity(256);

        for (byte, &point) in self.byte_to_point.iter().enumerate() {
            if let Some(&first) = seen.get(&point) {
                let err = MappingError::DuplicateCodePoint {
                    point: CodePoint(point),
                    first,
                    second: byte as u8,
                };
                tracing::debug!(%err, "mapping validation failed");
                return Err(err);
            }
            seen.insert(point, byte as u8);
        }

        tracing::debug!("mapping validated");
        Ok(self.clone())
    }

    /// Builds a validated table from `(byte key, U+XXXX)` pairs applied over
    /// the default table, in iteration order.
    pub fn from_overrides<'a, I>(entries: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = (*Self::shared_default()).clone();
        for (key, literal) in entries {
            let byte = ByteKey::parse_decimal(key)?;
            table = table.with_override(byte, literal)?;
        }
        table.validate()
    }

    /// Returns the character a byte encodes to.
    #[inline]
    pub fn point(&self, byte: u8) -> char {
        self.byte_to_point[byte as usize]
    }

    /// Returns the byte a character decodes to, if it is in the table.
    #[inline]
    pub fn byte(&self, c: char) -> Option<u8> {
        self.point_to_byte.get(&c).copied()
    }

    /// Iterates every `(byte, code point)` entry in byte order.
    pub fn entries(&self) -> impl Iterator<Item = (u8, CodePoint)> + '_ {
        self.byte_to_point
            .iter()
            .enumerate()
            .map(|(byte, &point)| (byte as u8, CodePoint(point)))
    }

    /// Lists the bytes whose entry differs from the default table.
    pub fn differences_from_default(&self) -> Vec<(u8, CodePoint)> {
        let default = Self::shared_default();
        self.entries()
            .filter(|&(byte, point)| default.point(byte) != point.as_char())
            .collect()
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        (*Self::shared_default()).clone()
    }
}

impl PartialEq for MappingTable {
    fn eq(&self, other: &Self) -> bool {
        self.byte_to_point == other.byte_to_point
    }
}

impl Eq for MappingTable {}

/// Serializes as a map of all 256 entries in byte order: `{"0": "U+2060", ...}`.
impl Serialize for MappingTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(256))?;
        for (byte, point) in self.entries() {
            map.serialize_entry(&byte.to_string(), &point)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_bijective() {
        let table = MappingTable::default();
        assert!(table.validate().is_ok());
        assert_eq!(table.point_to_byte.len(), 256);
    }

    #[test]
    fn test_default_nul_is_word_joiner() {
        let table = MappingTable::default();
        assert_eq!(table.point(0), '\u{2060}');
        assert_eq!(table.byte('\u{2060}'), Some(0));
    }

    #[test]
    fn test_default_known_entries() {
        let table = MappingTable::default();
        assert_eq!(table.point(1), '☺');
        assert_eq!(table.point(b'A'), 'A');
        assert_eq!(table.point(b'"'), '"');
        assert_eq!(table.point(127), '⌂');
        assert_eq!(table.point(128), 'Ç');
        assert_eq!(table.point(219), '█');
        assert_eq!(table.point(255), '\u{00A0}');
    }

    #[test]
    fn test_shared_default_is_one_instance() {
        let a = MappingTable::shared_default();
        let b = MappingTable::shared_default();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(CodePoint::parse_literal("U+201C").unwrap().as_char(), '“');
        assert_eq!(CodePoint::parse_literal("u+00e9").unwrap().as_char(), 'é');
        assert_eq!(CodePoint::parse_literal("U+0041").unwrap().value(), 0x41);
    }

    #[test]
    fn test_parse_literal_rejects_malformed() {
        for literal in ["201C", "U+201", "U+201CC", "U+20G1", "X+2060", "U+", "", "U+D800"] {
            assert_eq!(
                CodePoint::parse_literal(literal),
                Err(MappingError::MalformedCodePointLiteral(literal.to_string())),
                "literal {literal:?}"
            );
        }
    }

    #[test]
    fn test_code_point_display() {
        assert_eq!(CodePoint::new('\u{2060}').to_string(), "U+2060");
        assert_eq!(CodePoint::new('A').to_string(), "U+0041");
        assert_eq!(CodePoint::new('😀').to_string(), "U+1F600");
    }

    #[test]
    fn test_byte_key_conversions() {
        assert_eq!(ByteKey::parse_decimal("34"), Ok(34));
        assert_eq!(ByteKey::parse_decimal("0"), Ok(0));
        assert_eq!(ByteKey::parse_decimal("255"), Ok(255));
        assert_eq!(ByteKey::from_ascii('"'), Ok(34));

        assert!(matches!(ByteKey::parse_decimal("256"), Err(MappingError::InvalidByte(_))));
        assert!(matches!(ByteKey::parse_decimal("-1"), Err(MappingError::InvalidByte(_))));
        assert!(matches!(ByteKey::parse_decimal("\""), Err(MappingError::InvalidByte(_))));
        assert!(matches!(ByteKey::parse_decimal(""), Err(MappingError::InvalidByte(_))));
        assert!(matches!(ByteKey::parse_decimal("034"), Err(MappingError::InvalidByte(_))));
        assert!(matches!(ByteKey::parse_decimal("00"), Err(MappingError::InvalidByte(_))));
        assert!(matches!(ByteKey::parse_decimal(" 34"), Err(MappingError::InvalidByte(_))));
        assert!(matches!(ByteKey::parse_decimal("+34"), Err(MappingError::InvalidByte(_))));
        assert!(matches!(ByteKey::from_ascii('é'), Err(MappingError::InvalidByte(_))));
    }

    #[test]
    fn test_override_leaves_receiver_untouched() {
        let original = MappingTable::default();
        let quote = ByteKey::from_ascii('"').unwrap();
        let custom = original.with_override(quote, "U+201C").unwrap();

        assert_eq!(original.point(quote), '"');
        assert_eq!(original.byte('"'), Some(quote));
        assert_eq!(original.byte('“'), None);

        assert_eq!(custom.point(quote), '“');
        assert_eq!(custom.byte('“'), Some(quote));
        assert_eq!(custom.byte('"'), None);
        assert_ne!(original, custom);
    }

    #[test]
    fn test_malformed_override_has_no_effect() {
        let table = MappingTable::default();
        let err = table.with_override(34, "U+20").unwrap_err();
        assert_eq!(err, MappingError::MalformedCodePointLiteral("U+20".to_string()));
        assert_eq!(table, MappingTable::default());
    }

    #[test]
    fn test_duplicate_detection() {
        let table = MappingTable::default();
        let point = table.point(9);
        let collided = table.with_override_point(5, CodePoint::new(point));

        assert_eq!(
            collided.validate(),
            Err(MappingError::DuplicateCodePoint {
                point: CodePoint::new(point),
                first: 5,
                second: 9,
            })
        );
    }

    #[test]
    fn test_validate_returns_equal_table() {
        let table = MappingTable::default().with_override(34, "U+201C").unwrap();
        assert_eq!(table.validate().unwrap(), table);
    }

    #[test]
    fn test_from_overrides() {
        let table = MappingTable::from_overrides([("34", "U+201C"), ("0", "U+200B")]).unwrap();
        assert_eq!(table.point(34), '“');
        assert_eq!(table.point(0), '\u{200B}');
        assert_eq!(
            table.differences_from_default(),
            vec![(0, CodePoint::new('\u{200B}')), (34, CodePoint::new('“'))]
        );

        let err = MappingTable::from_overrides([("65", "U+0042")]).unwrap_err();
        assert!(matches!(err, MappingError::DuplicateCodePoint { first: 65, second: 66, .. }));

        let err = MappingTable::from_overrides([("300", "U+0042")]).unwrap_err();
        assert_eq!(err, MappingError::InvalidByte("300".to_string()));
    }

    #[test]
    fn test_serialize_in_byte_order() {
        let json = serde_json::to_string(&MappingTable::default()).unwrap();
        assert!(json.starts_with(r#"{"0":"U+2060","1":"U+263A","2":"U+263B""#));
        assert!(json.ends_with(r#""255":"U+00A0"}"#));
    }
}
