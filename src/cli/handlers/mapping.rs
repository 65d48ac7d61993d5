use base437::{MappingRegistry, MappingTable, export_mapping_document};

pub fn list(registry: &MappingRegistry) {
    println!("Available mappings:\n");

    for name in registry.names() {
        let Some(config) = registry.get_mapping(&name) else {
            continue;
        };
        let marker = if name == registry.default_name() { "*" } else { " " };
        let overrides = config
            .overrides
            .iter()
            .map(|(byte, point)| format!("{}={}", byte, point))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{} {:<15} {:<45} {}",
            marker,
            name,
            config.description.as_deref().unwrap_or(""),
            overrides
        );
    }
}

/// Stand-in for glyphs that have no visible width.
fn visible(c: char) -> char {
    match c {
        ' ' | '\u{00A0}' | '\u{200B}'..='\u{200F}' | '\u{2060}'..='\u{2064}' | '\u{FEFF}' => '·',
        c if c.is_control() => '·',
        c => c,
    }
}

/// Prints the table as 16 rows of 16 glyphs, indexed by high and low nibble.
pub fn render_grid(table: &MappingTable) {
    print!("    ");
    for low in 0..16 {
        print!(" {:X}", low);
    }
    println!();

    let entries: Vec<_> = table.entries().collect();
    for (high, row) in entries.chunks(16).enumerate() {
        print!("  {:X} ", high);
        for (_, point) in row {
            print!(" {}", visible(point.as_char()));
        }
        println!();
    }

    let changed = table.differences_from_default();
    if !changed.is_empty() {
        println!();
        for (byte, point) in changed {
            println!("  byte {:>3} -> {}", byte, point);
        }
    }
}

pub fn export(table: &MappingTable) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", export_mapping_document(table)?);
    Ok(())
}
