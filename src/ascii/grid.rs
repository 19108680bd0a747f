//! Image decoding and resampling into a fixed-size pixel grid.

use image::imageops::FilterType;
use thiserror::Error;

/// Errors that can occur while decoding or resampling image bytes.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image data is empty")]
    Empty,

    #[error("target width must be at least 1")]
    InvalidWidth,

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Row-major RGB pixel grid at 16 bits per channel.
///
/// Produced once by [`decode_and_resize`] and immutable afterwards.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<[u16; 3]>,
}

impl PixelGrid {
    /// Build a grid from raw pixels in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len()` does not equal `width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<[u16; 3]>) -> Self {
        assert_eq!(
            pixels.len(),
            width as usize * height as usize,
            "pixel count must match grid dimensions"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Grid width in pixels (one glyph per pixel when rendered).
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in pixels (one output line per row).
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Iterate over pixel rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u16; 3]]> {
        self.pixels.chunks(self.width.max(1) as usize)
    }
}

/// Decode raw image bytes and resample to `target_width` columns.
///
/// The format is sniffed from the bytes themselves (JPEG, PNG and GIF
/// are all covered by the decoder's defaults), never from a file
/// extension. The output height is derived from the source aspect
/// ratio, and resampling uses a Lanczos kernel to avoid aliasing
/// artifacts that would corrupt the luminance mapping downstream.
pub fn decode_and_resize(bytes: &[u8], target_width: u32) -> Result<PixelGrid, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }
    if target_width == 0 {
        return Err(ImageError::InvalidWidth);
    }

    let img = image::load_from_memory(bytes)?;
    let (src_w, src_h) = (img.width(), img.height());

    // Preserve the source aspect ratio; a rounded height of 0 is bumped
    // to a single row so tiny wide images still render.
    let target_height =
        ((target_width as f64 * src_h as f64 / src_w as f64).round() as u32).max(1);

    let resized = img.resize_exact(target_width, target_height, FilterType::Lanczos3);
    let rgb = resized.to_rgb16();
    let pixels = rgb.pixels().map(|p| [p.0[0], p.0[1], p.0[2]]).collect();

    Ok(PixelGrid::new(target_width, target_height, pixels))
}
