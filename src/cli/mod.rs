mod config;
mod handlers;
mod logging;
pub mod report;

use base437::{Codec, MappingRegistry, OutputShape};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "base437")]
#[command(version)]
#[command(
    about = "See binary the way it wants to be seen: encode any file as code page 437 glyphs, one character per byte",
    long_about = None
)]
struct Cli {
    /// File to process (if not provided, reads from stdin)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Decode base437 text back to bytes
    #[arg(short, long)]
    decode: bool,

    /// Shape of decoded output: raw_bytes, owned_buffer, text or integer_sequence
    #[arg(long, value_name = "SHAPE", requires = "decode")]
    output: Option<OutputShape>,

    /// Mapping preset to use (see --list)
    #[arg(short, long, value_name = "NAME")]
    mapping: Option<String>,

    /// Load the mapping from a JSON document instead of a preset
    #[arg(long, value_name = "PATH", conflicts_with = "mapping")]
    mapping_file: Option<PathBuf>,

    /// Remap one byte, e.g. --map 34=U+201C (repeatable)
    #[arg(long = "map", value_name = "BYTE=U+XXXX")]
    overrides: Vec<String>,

    /// Wrap encoded output in a data URL with this mimetype
    #[arg(long, value_name = "MIME", conflicts_with = "decode")]
    data_url: Option<String>,

    /// Convert a base437 data URL into a base64 data URL
    #[arg(long, conflicts_with_all = ["decode", "data_url", "from_base64_url"])]
    to_base64_url: bool,

    /// Convert a base64 data URL into a base437 data URL
    #[arg(long, conflicts_with_all = ["decode", "data_url"])]
    from_base64_url: bool,

    /// List available mapping presets
    #[arg(short, long)]
    list: bool,

    /// Show the active mapping as a 16x16 grid
    #[arg(long)]
    table: bool,

    /// Print the active mapping as a JSON document
    #[arg(long)]
    export_mapping: bool,

    /// Maximum input size in bytes (0 = unlimited)
    #[arg(long, default_value = "104857600")]
    max_size: usize,

    /// Process inputs exceeding --max-size
    #[arg(long)]
    force: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Load presets with user overrides
    let registry = MappingRegistry::load_with_overrides()?;

    if cli.list {
        handlers::mapping::list(&registry);
        return Ok(());
    }

    let table = config::resolve_table(
        &registry,
        cli.mapping.as_deref(),
        cli.mapping_file.as_deref(),
        &cli.overrides,
    )?;

    if cli.table {
        handlers::mapping::render_grid(&table);
        return Ok(());
    }

    if cli.export_mapping {
        return handlers::mapping::export(&table);
    }

    let codec = Codec::new(table);
    let input = read_input(&cli)?;

    if cli.to_base64_url {
        return handlers::locator::to_base64(&codec, into_text(input)?);
    }

    if cli.from_base64_url {
        return handlers::locator::from_base64(&codec, into_text(input)?);
    }

    if cli.decode {
        let shape = cli
            .output
            .or(registry.settings.output)
            .unwrap_or_default();
        return handlers::decode::handle(&codec, into_text(input)?, shape);
    }

    handlers::encode::handle(&codec, &input, cli.data_url.as_deref())
}

/// Reads the whole input from FILE or stdin, enforcing --max-size.
fn read_input(cli: &Cli) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if let Some(file_path) = &cli.file {
        if cli.max_size > 0 {
            let file_size = fs::metadata(file_path)?.len() as usize;
            if file_size > cli.max_size {
                if !cli.force {
                    return Err(format!(
                        "File size ({} bytes) exceeds limit ({} bytes). Use --force to process anyway.",
                        file_size, cli.max_size
                    )
                    .into());
                }
                tracing::warn!(file_size, limit = cli.max_size, "processing large file");
            }
        }
        return Ok(fs::read(file_path)?);
    }

    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer)?;

    if cli.max_size > 0 && buffer.len() > cli.max_size && !cli.force {
        return Err(format!(
            "Input size ({} bytes) exceeds maximum ({} bytes). Use --force to process anyway.",
            buffer.len(),
            cli.max_size
        )
        .into());
    }

    Ok(buffer)
}

fn into_text(input: Vec<u8>) -> Result<String, Box<dyn std::error::Error>> {
    String::from_utf8(input).map_err(|_| "Input data is not valid UTF-8 text for decoding".into())
}
