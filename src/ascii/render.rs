//! Colored glyph rendering for pixel grids.

use super::charset::glyph_for;
use super::grid::PixelGrid;

/// Wrap a glyph in a 24-bit ANSI foreground color directive.
///
/// ANSI true color: `ESC[38;2;R;G;Bm` for foreground, reset after the
/// glyph so each cell carries its own color.
fn colorize(glyph: char, r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, glyph)
}

/// Render a pixel grid as ANSI-colored ASCII art.
///
/// Each pixel becomes one glyph: its luminance is the unweighted mean
/// of the three 16-bit channels (deliberately not a perceptual
/// formula; output determinism depends on this), mapped linearly onto
/// the ramp. The glyph is colored with the pixel's own RGB values
/// normalized to 8 bits. Rows are emitted top to bottom, one line per
/// pixel row.
pub fn render(grid: &PixelGrid) -> String {
    // ~20 bytes of escape codes per glyph
    let cells = grid.width() as usize * grid.height() as usize;
    let mut out = String::with_capacity(cells * 20 + grid.height() as usize);

    for row in grid.rows() {
        for &[r, g, b] in row {
            let luminance = ((r as u32 + g as u32 + b as u32) / 3) as u16;
            out.push_str(&colorize(
                glyph_for(luminance),
                (r >> 8) as u8,
                (g >> 8) as u8,
                (b >> 8) as u8,
            ));
        }
        out.push('\n');
    }

    out
}
