//! Tests for the image-to-text pipeline: decoding, resampling and
//! colored glyph rendering.

use std::io::Cursor;

use image::{ImageBuffer, ImageFormat, Rgb};

use boxgaze::ascii::{decode_and_resize, ramp_index, render, PixelGrid, GLYPH_RAMP};

/// Remove ANSI escape sequences, leaving only the glyphs.
fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for escaped in chars.by_ref() {
                if escaped == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn gray_grid(width: u32, height: u32, value: u16) -> PixelGrid {
    PixelGrid::new(
        width,
        height,
        vec![[value, value, value]; width as usize * height as usize],
    )
}

/// Encode an RGB buffer into an in-memory container of the given format.
fn encode(img: &ImageBuffer<Rgb<u8>, Vec<u8>>, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

fn checkerboard() -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    // White on the main diagonal, black elsewhere.
    let mut img = ImageBuffer::from_pixel(2, 2, Rgb([0u8, 0, 0]));
    img.put_pixel(0, 0, Rgb([255, 255, 255]));
    img.put_pixel(1, 1, Rgb([255, 255, 255]));
    img
}

// === Rendering invariants ===

#[test]
fn test_uniform_gray_renders_one_glyph_everywhere() {
    for value in [0u16, 13_000, 32_768, 50_000, u16::MAX] {
        let out = render(&gray_grid(8, 4, value));
        let stripped = strip_ansi(&out);
        let glyphs: Vec<char> = stripped.chars().filter(|c| *c != '\n').collect();
        assert_eq!(glyphs.len(), 32);
        assert!(
            glyphs.iter().all(|g| *g == glyphs[0]),
            "mixed glyphs for uniform value {}",
            value
        );
    }
}

#[test]
fn test_ramp_index_never_decreases_as_gray_value_rises() {
    let mut prev = 0;
    for value in (0..=u16::MAX).step_by(251) {
        let idx = ramp_index(value);
        assert!(idx >= prev, "ramp index decreased at value {}", value);
        prev = idx;
    }
}

#[test]
fn test_output_shape_matches_grid_dimensions() {
    for (width, height) in [(1u32, 1u32), (1, 80), (80, 1), (80, 100)] {
        let out = render(&gray_grid(width, height, 20_000));
        let stripped = strip_ansi(&out);
        let lines: Vec<&str> = stripped.lines().collect();
        assert_eq!(lines.len(), height as usize, "line count for {}x{}", width, height);
        assert!(
            lines.iter().all(|l| l.chars().count() == width as usize),
            "glyph count per line for {}x{}",
            width,
            height
        );
    }
}

#[test]
fn test_every_glyph_carries_its_own_color_directive() {
    let grid = PixelGrid::new(
        2,
        1,
        vec![[u16::MAX, 0, 0], [0, 0, u16::MAX]],
    );
    let out = render(&grid);
    assert!(out.contains("\x1b[38;2;255;0;0m"));
    assert!(out.contains("\x1b[38;2;0;0;255m"));
}

// === Decode and resize ===

#[test]
fn test_decode_is_format_sniffed_not_extension_based() {
    let img = checkerboard();
    for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::Gif] {
        let bytes = encode(&img, format);
        let grid = decode_and_resize(&bytes, 2).unwrap();
        assert_eq!(grid.width(), 2, "width for {:?}", format);
        assert_eq!(grid.height(), 2, "height for {:?}", format);
    }
}

#[test]
fn test_resize_preserves_aspect_ratio() {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(100, 50, Rgb([128, 128, 128]));
    let bytes = encode(&img, ImageFormat::Png);

    let grid = decode_and_resize(&bytes, 80).unwrap();
    assert_eq!(grid.width(), 80);
    assert_eq!(grid.height(), 40);
}

#[test]
fn test_resize_of_a_wide_sliver_keeps_at_least_one_row() {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(400, 2, Rgb([10, 10, 10]));
    let bytes = encode(&img, ImageFormat::Png);

    let grid = decode_and_resize(&bytes, 40).unwrap();
    assert_eq!(grid.width(), 40);
    assert_eq!(grid.height(), 1);
}

// === End-to-end round trip ===

#[test]
fn test_checkerboard_round_trip_hits_the_ramp_extremes() {
    let bytes = encode(&checkerboard(), ImageFormat::Png);
    let grid = decode_and_resize(&bytes, 2).unwrap();
    let stripped = strip_ansi(&render(&grid));

    let lines: Vec<&str> = stripped.lines().collect();
    let brightest = *GLYPH_RAMP.last().unwrap();
    let darkest = GLYPH_RAMP[0];

    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0].chars().collect::<Vec<_>>(),
        vec![brightest, darkest]
    );
    assert_eq!(
        lines[1].chars().collect::<Vec<_>>(),
        vec![darkest, brightest]
    );
}
