//! Prints the file header, program headers, and section headers of a 32-bit ELF file.

use std::io;

use anyhow::{Context, Result};
use elf::ParsedImage;

pub mod cli;

fn main() -> Result<()> {
    let config = cli::get_config();

    env_logger::Builder::new()
        .filter_level(config.log_level.as_filter())
        .init();

    let bytes = std::fs::read(&config.path)
        .with_context(|| format!("error reading \"{}\"", config.path.display()))?;
    log::info!("read {} bytes from \"{}\"", bytes.len(), config.path.display());

    let image = ParsedImage::parse(bytes.as_slice())
        .with_context(|| format!("error decoding \"{}\"", config.path.display()))?;

    elfdump::write_report(&mut io::stdout().lock(), &image, bytes.as_slice())
}
