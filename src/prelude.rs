//! Convenient re-exports for common usage.
//!
//! ```
//! use base437::prelude::*;
//!
//! let codec = Codec::new(MappingTable::default().with_override(0, "U+200B")?.validate()?);
//! assert_eq!(codec.encode([0u8]), "\u{200B}");
//! # Ok::<(), MappingError>(())
//! ```

pub use crate::{
    ByteKey, Codec, CodecError, CodePoint, Decoded, MappingError, MappingRegistry, MappingTable,
    OutputShape,
};
