//! Terminal rendering of a QR raster.
//!
//! Each pixel becomes a two-column cell painted with an ANSI background
//! color, which keeps modules roughly square in a typical terminal font.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor};
use image::{Rgba, RgbaImage};

use super::raster::DARK;

/// Glyph printed for every cell; the color comes from the background.
pub const CELL: &str = "  ";

/// Terminal columns taken by one module.
pub const CELL_WIDTH: usize = 2;

/// Color of a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Black,
    White,
}

impl Cell {
    /// Only an exact opaque-black pixel is black; everything else is white.
    pub fn for_pixel(pixel: &Rgba<u8>) -> Self {
        if *pixel == DARK {
            Cell::Black
        } else {
            Cell::White
        }
    }

    fn background(self) -> Color {
        match self {
            Cell::Black => Color::Black,
            Cell::White => Color::White,
        }
    }
}

/// Write `raster` to `out` as rows of colored cells, one line per pixel row.
pub fn render<W: Write>(raster: &RgbaImage, out: &mut W) -> std::io::Result<()> {
    for y in 0..raster.height() {
        for x in 0..raster.width() {
            queue!(
                out,
                SetBackgroundColor(Cell::for_pixel(raster.get_pixel(x, y)).background()),
                Print(CELL),
                ResetColor
            )?;
        }
        queue!(out, Print('\n'))?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::raster::LIGHT;

    #[test]
    fn test_cell_for_pixel() {
        assert_eq!(Cell::for_pixel(&Rgba([0, 0, 0, 255])), Cell::Black);
        assert_eq!(Cell::for_pixel(&Rgba([255, 255, 255, 255])), Cell::White);
    }

    #[test]
    fn test_cell_for_non_opaque_black_is_white() {
        // Transparent and near-black pixels render as white
        assert_eq!(Cell::for_pixel(&Rgba([0, 0, 0, 0])), Cell::White);
        assert_eq!(Cell::for_pixel(&Rgba([0, 0, 0, 254])), Cell::White);
        assert_eq!(Cell::for_pixel(&Rgba([1, 0, 0, 255])), Cell::White);
    }

    #[test]
    fn test_render_line_geometry() {
        let mut raster = RgbaImage::from_pixel(3, 2, LIGHT);
        raster.put_pixel(1, 0, DARK);

        let mut out = Vec::new();
        render(&raster, &mut out).unwrap();
        let plain = strip_ansi_escapes::strip_str(String::from_utf8(out).unwrap());

        let lines: Vec<&str> = plain.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert_eq!(line.len(), 3 * CELL_WIDTH);
            assert!(line.chars().all(|c| c == ' '));
        }
        assert!(plain.ends_with('\n'));
    }

    #[test]
    fn test_render_empty_raster() {
        let raster = RgbaImage::new(0, 0);
        let mut out = Vec::new();
        render(&raster, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
