//! Error types for the encode → render → write pipeline.

use std::path::PathBuf;

/// Errors that stop a text2qr run.
#[derive(Debug, thiserror::Error)]
pub enum Text2QrError {
    #[error("Failed to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("Failed to write QR code to console: {0}")]
    Console(#[source] std::io::Error),

    #[error("Cannot scale a {edge}x{edge} QR code into a {target}x{target} image")]
    Scale { edge: u32, target: u32 },

    #[error("Failed to open '{}': {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write PNG to '{}': {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
