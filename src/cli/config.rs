use base437::{ByteKey, MappingRegistry, MappingTable, import_mapping_document};
use std::fs;
use std::path::Path;

/// Splits a `BYTE=U+XXXX` override argument.
fn parse_override(spec: &str) -> Result<(u8, &str), Box<dyn std::error::Error>> {
    let (key, literal) = spec
        .split_once('=')
        .ok_or_else(|| format!("Invalid --map value '{}': expected BYTE=U+XXXX", spec))?;
    Ok((ByteKey::parse_decimal(key)?, literal.trim()))
}

/// Builds the table selected on the command line.
///
/// Starts from `--mapping-file` or the named (or default) preset, applies each
/// `--map` override in order, and validates once at the end.
pub fn resolve_table(
    registry: &MappingRegistry,
    mapping: Option<&str>,
    mapping_file: Option<&Path>,
    overrides: &[String],
) -> Result<MappingTable, Box<dyn std::error::Error>> {
    let mut table = match mapping_file {
        Some(path) => import_mapping_document(&fs::read_to_string(path)?)?,
        None => registry.build(mapping.unwrap_or(registry.default_name()))?,
    };

    if overrides.is_empty() {
        return Ok(table);
    }

    for spec in overrides {
        let (byte, literal) = parse_override(spec)?;
        table = table.with_override(byte, literal)?;
    }

    Ok(table.validate()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        let (byte, literal) = parse_override("34=U+201C").unwrap();
        assert_eq!(byte, 34);
        assert_eq!(literal, "U+201C");
        assert!(parse_override("34:U+201C").is_err());
        assert!(parse_override("999=U+201C").is_err());
    }

    #[test]
    fn test_resolve_with_overrides() {
        let registry = MappingRegistry::load_default().unwrap();
        let table = resolve_table(
            &registry,
            None,
            None,
            &["0=U+200B".to_string(), "34=U+201C".to_string()],
        )
        .unwrap();
        assert_eq!(table.point(0), '\u{200B}');
        assert_eq!(table.point(34), '“');
    }

    #[test]
    fn test_resolve_rejects_duplicates() {
        let registry = MappingRegistry::load_default().unwrap();
        let err = resolve_table(&registry, Some("html"), None, &["35=U+201C".to_string()])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate code point U+201C"));
    }
}
