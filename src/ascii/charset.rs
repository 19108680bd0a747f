//! Glyph ramp and luminance-to-glyph mapping.

/// Standard ASCII density ramp (10 levels).
/// Characters ordered from darkest (space) to brightest (@).
pub const GLYPH_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Maximum value of a 16-bit color channel.
pub const MAX_CHANNEL: u32 = u16::MAX as u32;

/// Map a 16-bit luminance value to an index into [`GLYPH_RAMP`].
///
/// The mapping is linear: 0 maps to the first (darkest) entry and
/// `u16::MAX` to the last (brightest). The result is clamped to the
/// valid range.
pub fn ramp_index(luminance: u16) -> usize {
    let levels = GLYPH_RAMP.len() as u32;
    let idx = luminance as u32 * (levels - 1) / MAX_CHANNEL;
    idx.min(levels - 1) as usize
}

/// Map a 16-bit luminance value to a ramp glyph.
pub fn glyph_for(luminance: u16) -> char {
    GLYPH_RAMP[ramp_index(luminance)]
}
