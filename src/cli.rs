//! Command-line interface definitions and helpers.

use clap::Parser;
use std::path::PathBuf;

/// Render a random image from a Box folder as colored ASCII art
#[derive(Parser, Debug)]
#[command(name = "boxgaze")]
#[command(version, about = "Render a random Box folder image as ASCII art in the terminal", long_about = None)]
pub struct Args {
    /// Box folder ID to pull images from
    #[arg(short, long)]
    pub folder: String,

    /// Output width in characters
    #[arg(short, long, default_value = "80", value_parser = parse_width)]
    pub width: u32,

    /// Path to the Box app settings JSON (default: ~/.config/boxgaze/config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Parse and validate output width (1-1000 characters)
fn parse_width(s: &str) -> Result<u32, String> {
    let width: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid width", s))?;
    if !(1..=1000).contains(&width) {
        return Err(format!("Width must be between 1 and 1000, got {}", width));
    }
    Ok(width)
}
