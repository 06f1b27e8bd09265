//! PNG file output.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::{ImageError, RgbaImage};

use crate::error::Text2QrError;

/// Default output file, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "qrcode.png";

/// Permission bits for a newly created output file (before umask).
#[cfg(unix)]
pub const FILE_MODE: u32 = 0o660;

/// Open `path` for writing, creating or truncating it.
pub fn open_output(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    options.open(path)
}

/// Encode `image` as PNG into `path`.
///
/// The file is closed when this returns, whether encoding succeeded or not.
/// A failed encode can leave a partial file behind.
pub fn write_png(path: &Path, image: &RgbaImage) -> Result<(), Text2QrError> {
    let file = open_output(path).map_err(|source| Text2QrError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    encode_png(&mut writer, image)
        .and_then(|()| writer.flush().map_err(ImageError::IoError))
        .map_err(|source| Text2QrError::FileWrite {
            path: PathBuf::from(path),
            source,
        })
}

/// Encode `image` as PNG into any writer.
pub fn encode_png<W: Write>(writer: W, image: &RgbaImage) -> Result<(), ImageError> {
    image.write_with_encoder(PngEncoder::new(writer))
}
