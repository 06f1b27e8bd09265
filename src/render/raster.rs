//! Pixel rasters built from a [`QrMatrix`].

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::Text2QrError;
use crate::qr::QrMatrix;

/// Opaque black, used for dark modules.
pub const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Opaque white, used for light modules, the border and scaling margins.
pub const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Default border width in modules.
pub const DEFAULT_BORDER: u32 = 1;

/// Rasterize the matrix at one pixel per module, surrounded by `border`
/// light modules on every side.
pub fn bordered(matrix: &QrMatrix, border: u32) -> RgbaImage {
    let edge = matrix.width() + 2 * border;

    ImageBuffer::from_fn(edge, edge, |x, y| {
        let inside = (border..border + matrix.width()).contains(&x)
            && (border..border + matrix.width()).contains(&y);
        if inside && matrix.is_dark(x - border, y - border) {
            DARK
        } else {
            LIGHT
        }
    })
}

/// Scale a square raster to `target × target` pixels.
///
/// Every source pixel becomes an integer-sized block so modules stay
/// uniform; the leftover is split evenly as a light margin around the code.
pub fn scale(raster: &RgbaImage, target: u32) -> Result<RgbaImage, Text2QrError> {
    let edge = raster.width();
    if edge == 0 || raster.height() != edge {
        return Err(Text2QrError::Scale { edge, target });
    }

    let factor = target / edge;
    if factor == 0 {
        return Err(Text2QrError::Scale { edge, target });
    }
    let offset = (target - edge * factor) / 2;
    let span = edge * factor;

    Ok(ImageBuffer::from_fn(target, target, |x, y| {
        if x < offset || y < offset || x >= offset + span || y >= offset + span {
            return LIGHT;
        }
        *raster.get_pixel((x - offset) / factor, (y - offset) / factor)
    }))
}
