//! Data URL helpers.
//!
//! Base437 payloads travel in data URLs tagged `base437`:
//! `data:image/png;base437,‰PNG…`. Browsers only understand `base64`, so these
//! helpers convert between the two tags without changing the bytes carried.

use base64::prelude::*;

use crate::encoders::codec::Codec;
use crate::errors::CodecError;

/// Codec tag identifying base437 payloads in data URLs.
pub const CODEC_TAG: &str = "base437";

/// The standard base-64 tag.
pub const BASE64_TAG: &str = "base64";

const SCHEME: &str = "data:";

/// A parsed `data:<mimetype>;<tag>,<payload>` string, borrowing its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataLocator<'a> {
    pub mime_type: &'a str,
    pub tag: &'a str,
    pub payload: &'a str,
}

impl<'a> DataLocator<'a> {
    /// Splits a data URL into its parts.
    ///
    /// The mimetype runs up to the first `;` and must not be empty; the tag
    /// runs from there to the first `,`; the payload is everything after and
    /// may contain any character, including `;` and `,`.
    pub fn parse(input: &'a str) -> Result<Self, CodecError> {
        let rest = input.strip_prefix(SCHEME).ok_or(CodecError::NotADataLocator)?;
        let (mime_type, rest) = rest.split_once(';').ok_or(CodecError::NotADataLocator)?;
        let (tag, payload) = rest.split_once(',').ok_or(CodecError::NotADataLocator)?;

        if mime_type.is_empty() {
            return Err(CodecError::NotADataLocator);
        }

        Ok(DataLocator {
            mime_type,
            tag,
            payload,
        })
    }

    fn expect_tag(&self, expected: &'static str) -> Result<(), CodecError> {
        if self.tag == expected {
            Ok(())
        } else {
            Err(CodecError::WrongCodecTag {
                expected,
                found: self.tag.to_string(),
            })
        }
    }
}

fn format_locator(mime_type: &str, tag: &str, payload: &str) -> String {
    format!("{SCHEME}{mime_type};{tag},{payload}")
}

impl Codec {
    /// Wraps encoded bytes in a `base437` data URL.
    pub fn to_data_locator(&self, mime_type: &str, data: impl AsRef<[u8]>) -> String {
        format_locator(mime_type, CODEC_TAG, &self.encode(data))
    }

    /// Converts a `base437` data URL into the equivalent `base64` data URL.
    ///
    /// # Example
    /// ```
    /// use base437::Codec;
    ///
    /// let codec = Codec::default();
    /// let url = codec.to_standard_encoding("data:text/plain;base437,Hi!").unwrap();
    /// assert_eq!(url, "data:text/plain;base64,SGkh");
    /// ```
    ///
    /// # Errors
    ///
    /// [`CodecError::NotADataLocator`] for malformed input,
    /// [`CodecError::WrongCodecTag`] when the tag is not `base437`, and
    /// [`CodecError::InvalidCharacterAt`] when the payload does not decode
    /// under this codec's table.
    pub fn to_standard_encoding(&self, locator: &str) -> Result<String, CodecError> {
        let parsed = DataLocator::parse(locator)?;
        parsed.expect_tag(CODEC_TAG)?;

        let bytes = self.decode(parsed.payload)?;
        tracing::debug!(
            mime_type = parsed.mime_type,
            bytes = bytes.len(),
            "transcoding data URL to base64"
        );

        Ok(format_locator(
            parsed.mime_type,
            BASE64_TAG,
            &BASE64_STANDARD.encode(bytes),
        ))
    }

    /// Converts a `base64` data URL into a `base437` data URL.
    ///
    /// # Errors
    ///
    /// [`CodecError::NotADataLocator`], [`CodecError::WrongCodecTag`] when the
    /// tag is not `base64`, or [`CodecError::InvalidBase64`].
    pub fn from_standard_encoding(&self, locator: &str) -> Result<String, CodecError> {
        let parsed = DataLocator::parse(locator)?;
        parsed.expect_tag(BASE64_TAG)?;

        let bytes = BASE64_STANDARD.decode(parsed.payload)?;
        Ok(self.to_data_locator(parsed.mime_type, bytes))
    }
}
