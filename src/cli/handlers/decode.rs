use crate::cli::report::InvalidInputReport;
use base437::{Codec, CodecError, Decoded, MappingTable, OutputShape};
use std::io::{self, Write};

/// Drops one trailing `\n` or `\r\n`, unless the table maps those characters.
///
/// A lone `\r` is left in place and reaches the decoder.
pub fn strip_line_ending<'a>(text: &'a str, table: &MappingTable) -> &'a str {
    if table.byte('\n').is_some() {
        return text;
    }
    let Some(text) = text.strip_suffix('\n') else {
        return text;
    };
    match text.strip_suffix('\r') {
        Some(stripped) if table.byte('\r').is_none() => stripped,
        _ => text,
    }
}

pub fn handle(
    codec: &Codec,
    input_text: String,
    shape: OutputShape,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = strip_line_ending(&input_text, codec.table());

    let decoded = codec.decode_as(text, shape).map_err(|e| match e {
        CodecError::InvalidCharacterAt {
            position,
            character,
        } => {
            Box::new(InvalidInputReport::new(text, position, character))
                as Box<dyn std::error::Error>
        }
        other => other.into(),
    })?;
    tracing::debug!(bytes = decoded.len(), %shape, "decoded input");

    let mut stdout = io::stdout().lock();
    match decoded {
        Decoded::Raw(bytes) => stdout.write_all(&bytes)?,
        Decoded::Buffer(bytes) => stdout.write_all(&bytes)?,
        Decoded::Text(text) => stdout.write_all(text.as_bytes())?,
        Decoded::Integers(values) => writeln!(stdout, "{}", serde_json::to_string(&values)?)?,
    }
    stdout.flush()?;
    Ok(())
}
