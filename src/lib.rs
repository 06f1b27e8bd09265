//! text2qr library crate.
//!
//! Encodes text as a QR code, prints it to the terminal and writes it as a
//! PNG. The binary is a thin wrapper around [`pipeline::run`].

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod qr;
pub mod render;

pub use error::Text2QrError;
