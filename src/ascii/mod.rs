//! ASCII renderer module for converting downloaded images to ASCII art.
//!
//! This module provides the pipeline for turning raw image bytes into
//! colored text suitable for terminal display:
//!
//! 1. **Decoding** - format-sniffed decode of JPEG/PNG/GIF bytes
//! 2. **Resampling** - Lanczos resize to the target character width
//! 3. **Glyph mapping** - per-pixel luminance onto a density ramp
//! 4. **Colorizing** - 24-bit ANSI foreground from each pixel's RGB

mod charset;
mod grid;
mod render;

pub use charset::{glyph_for, ramp_index, GLYPH_RAMP, MAX_CHANNEL};
pub use grid::{decode_and_resize, ImageError, PixelGrid};
pub use render::render;
