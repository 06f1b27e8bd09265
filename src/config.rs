//! Configuration file handling for text2qr.
//!
//! Loads configuration from `~/.config/text2qr/config.toml` or a custom path.

use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logging::{self, DEFAULT_LEVEL};
use crate::output::DEFAULT_OUTPUT;
use crate::render::DEFAULT_BORDER;

/// Default PNG edge length in pixels.
pub const DEFAULT_SIZE: u32 = 300;

/// Largest accepted PNG edge length in pixels.
pub const MAX_SIZE: u32 = 4096;

/// Largest accepted border in modules.
pub const MAX_BORDER: u32 = 16;

/// Configuration file structure for text2qr.
/// Loaded from ~/.config/text2qr/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
    pub size: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    pub border: Option<u32>,
    pub console: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    pub level: Option<String>,
}

impl Config {
    /// Load configuration from the default path.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a path given on the command line.
    /// Unlike [`Config::load`], the file must exist.
    pub fn load_from_explicit(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Self::load_from(path)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Invalid { message, .. } => ConfigError::Invalid {
                path: path.to_path_buf(),
                message,
            },
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::Invalid {
            path: PathBuf::new(),
            message,
        };

        if let Some(size) = self.output.size {
            check_size(size).map_err(invalid)?;
        }
        if let Some(border) = self.render.border {
            check_border(border).map_err(invalid)?;
        }
        if let Some(level) = &self.log.level {
            if logging::parse_level(level).is_none() {
                return Err(invalid(format!("unknown log level '{}'", level)));
            }
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn size(&self) -> u32 {
        self.output.size.unwrap_or(DEFAULT_SIZE)
    }

    pub fn border(&self) -> u32 {
        self.render.border.unwrap_or(DEFAULT_BORDER)
    }

    pub fn console(&self) -> bool {
        self.render.console.unwrap_or(true)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log
            .level
            .as_deref()
            .and_then(logging::parse_level)
            .unwrap_or(DEFAULT_LEVEL)
    }
}

/// Validate a PNG edge length.
pub fn check_size(size: u32) -> Result<u32, String> {
    if !(1..=MAX_SIZE).contains(&size) {
        return Err(format!(
            "Size must be between 1 and {} pixels, got {}",
            MAX_SIZE, size
        ));
    }
    Ok(size)
}

/// Validate a border width.
pub fn check_border(border: u32) -> Result<u32, String> {
    if border > MAX_BORDER {
        return Err(format!(
            "Border must be at most {} modules, got {}",
            MAX_BORDER, border
        ));
    }
    Ok(border)
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid config file '{}': {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::NotFound { path }
            | ConfigError::Io { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("text2qr").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/text2qr/config.toml")
        })
}
