use base437::Codec;
use std::io::{self, Write};

pub fn handle(
    codec: &Codec,
    data: &[u8],
    data_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let encoded = match data_url {
        Some(mime_type) => codec.to_data_locator(mime_type, data),
        None => codec.encode(data),
    };
    tracing::debug!(bytes = data.len(), "encoded input");

    // No trailing newline: the output is exactly the encoded text.
    let mut stdout = io::stdout().lock();
    stdout.write_all(encoded.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
