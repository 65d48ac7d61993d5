use base437::Codec;

/// Prints the base64 form of a base437 data URL.
pub fn to_base64(codec: &Codec, input_text: String) -> Result<(), Box<dyn std::error::Error>> {
    let locator = super::decode::strip_line_ending(&input_text, codec.table());
    println!("{}", codec.to_standard_encoding(locator)?);
    Ok(())
}

/// Prints the base437 form of a base64 data URL.
pub fn from_base64(codec: &Codec, input_text: String) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", codec.from_standard_encoding(input_text.trim())?);
    Ok(())
}
