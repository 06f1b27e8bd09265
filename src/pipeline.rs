//! End-to-end run: encode, print to the console, scale, write the PNG.
//!
//! Every failure is logged as a warning with its context before it is
//! returned, so the caller only has to turn it into an exit status.

use std::io::Write;
use std::path::PathBuf;

use log::Log;

use crate::config::{Config, DEFAULT_SIZE};
use crate::error::Text2QrError;
use crate::output::{self, DEFAULT_OUTPUT};
use crate::qr;
use crate::render::{self, DEFAULT_BORDER};

/// Resolved parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Output PNG path.
    pub output: PathBuf,
    /// Output PNG edge length in pixels.
    pub size: u32,
    /// Light border around the code, in modules.
    pub border: u32,
    /// Print the code to the console.
    pub console: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            size: DEFAULT_SIZE,
            border: DEFAULT_BORDER,
            console: true,
        }
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            output: config.output_path(),
            size: config.size(),
            border: config.border(),
            console: config.console(),
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub version: i16,
    pub modules: u32,
    pub output: PathBuf,
}

/// Run the whole pipeline for `text`.
///
/// The console rendering goes to `console` when `settings.console` is set.
/// Nothing is written to disk unless encoding and scaling both succeed.
pub fn run<W: Write>(
    text: &str,
    settings: &Settings,
    logger: &dyn Log,
    console: &mut W,
) -> Result<Outcome, Text2QrError> {
    log::info!(logger: logger, content = text; "Create QRcode image");

    let matrix = qr::encode(text).inspect_err(|e| {
        log::warn!(logger: logger, error:% = e; "encode qrcode failure");
    })?;
    log::debug!(
        logger: logger,
        version = matrix.version(),
        modules = matrix.width();
        "qrcode encoded"
    );

    let raster = render::bordered(&matrix, settings.border);

    if settings.console {
        render::render_console(&raster, console)
            .map_err(Text2QrError::Console)
            .inspect_err(|e| {
                log::warn!(logger: logger, error:% = e; "print qrcode failure");
            })?;
    }

    log::info!(
        logger: logger,
        width = settings.size,
        height = settings.size;
        "scale qrcode"
    );
    let scaled = render::scale(&raster, settings.size).inspect_err(|e| {
        log::warn!(logger: logger, error:% = e; "scale qrcode failure");
    })?;

    let filename = settings.output.display().to_string();
    output::write_png(&settings.output, &scaled).inspect_err(|e| match e {
        Text2QrError::FileOpen { source, .. } => {
            log::warn!(
                logger: logger,
                filename = filename.as_str(),
                error:% = source;
                "open file failure"
            );
        }
        _ => {
            log::warn!(
                logger: logger,
                filename = filename.as_str(),
                error:% = e;
                "write qrcode to file failure"
            );
        }
    })?;
    log::info!(logger: logger, filename = filename.as_str(); "qrcode written");

    Ok(Outcome {
        version: matrix.version(),
        modules: matrix.width(),
        output: settings.output.clone(),
    })
}
