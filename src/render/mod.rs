//! Rendering of encoded QR matrices.
//!
//! 1. [`raster::bordered`] - one pixel per module plus a light border
//! 2. [`console::render`] - colored cells on a terminal
//! 3. [`raster::scale`] - fixed-size bitmap for the PNG file

pub mod console;
pub mod raster;

pub use console::{render as render_console, Cell, CELL_WIDTH};
pub use raster::{bordered, scale, DARK, DEFAULT_BORDER, LIGHT};
