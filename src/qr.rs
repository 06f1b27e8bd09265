//! QR encoding.
//!
//! Encoding itself is done by the `qrcode` crate; this module pins the
//! error-correction level to High and exposes the result as a plain module
//! matrix for the renderers.

use qrcode::{Color, EcLevel, QrCode, Version};

use crate::error::Text2QrError;

/// Error-correction level used for every code.
pub const EC_LEVEL: EcLevel = EcLevel::H;

/// Square matrix of QR modules, `true` meaning dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    modules: Vec<bool>,
    width: u32,
    version: i16,
}

impl QrMatrix {
    /// Build a matrix from row-major modules.
    ///
    /// Returns `None` unless `modules.len() == width * width`.
    #[cfg(test)]
    pub(crate) fn from_modules(modules: Vec<bool>, width: u32, version: i16) -> Option<Self> {
        if modules.len() != (width as usize) * (width as usize) {
            return None;
        }
        Some(Self {
            modules,
            width,
            version,
        })
    }

    /// Modules per side.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// QR version (1-40) picked for the content.
    pub fn version(&self) -> i16 {
        self.version
    }

    /// Whether the module at (`x`, `y`) is dark. Out-of-range reads are light.
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.width {
            return false;
        }
        self.modules[(y * self.width + x) as usize]
    }
}

/// Encode `text` at error-correction level High with automatic version selection.
pub fn encode(text: &str) -> Result<QrMatrix, Text2QrError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EC_LEVEL)?;

    let width = code.width() as u32;
    let version = match code.version() {
        Version::Normal(v) | Version::Micro(v) => v,
    };
    let modules = code
        .to_colors()
        .into_iter()
        .map(|color| color == Color::Dark)
        .collect();

    Ok(QrMatrix {
        modules,
        width,
        version,
    })
}
