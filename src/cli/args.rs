//! CLI argument parsing with clap.

use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use crate::config::{check_border, check_size, Config};
use crate::pipeline::Settings;

/// Parse and validate the output size (1-4096 pixels)
fn parse_size(s: &str) -> Result<u32, String> {
    let size: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid size", s))?;
    check_size(size)
}

/// Parse and validate the border width (0-16 modules)
fn parse_border(s: &str) -> Result<u32, String> {
    let border: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid border width", s))?;
    check_border(border)
}

/// text2qr - convert text to qrcode
#[derive(Parser, Debug)]
#[command(name = "text2qr")]
#[command(version, about = "Convert text to a QR code", long_about = None)]
#[command(after_help = "EXAMPLES:
    text2qr \"HELLO\"                       # print and write ./qrcode.png
    text2qr -o wifi.png -s 600 \"WIFI:S:home;;\"
    text2qr --no-console -b 4 \"https://example.com\"")]
pub struct Args {
    /// Text to encode (may start with '-')
    #[arg(allow_hyphen_values = true)]
    pub text: String,

    /// Output PNG path (default: qrcode.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output image width and height in pixels (default: 300)
    #[arg(short, long, value_parser = parse_size)]
    pub size: Option<u32>,

    /// Light border around the code, in modules (default: 1)
    #[arg(short, long, value_parser = parse_border)]
    pub border: Option<u32>,

    /// Do not print the code to the terminal
    #[arg(long)]
    pub no_console: bool,

    /// Show progress messages (-vv for debug output)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Config file path
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Merge settings: CLI args > config file > built-in defaults.
    pub fn settings(&self, config: &Config) -> Settings {
        let base = Settings::from(config);
        Settings {
            output: self.output.clone().unwrap_or(base.output),
            size: self.size.unwrap_or(base.size),
            border: self.border.unwrap_or(base.border),
            console: base.console && !self.no_console,
        }
    }

    /// Log level from -q/-v, falling back to the configured level.
    pub fn log_level(&self, configured: LevelFilter) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => configured,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["text2qr", "HELLO"]);
        assert_eq!(args.text, "HELLO");
        assert!(args.output.is_none());
        assert!(args.size.is_none());
        assert!(args.border.is_none());
        assert!(!args.no_console);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_args_requires_text() {
        let err = Args::try_parse_from(["text2qr"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_args_rejects_second_text() {
        let err = Args::try_parse_from(["text2qr", "one", "two"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_args_text_with_spaces() {
        let args = Args::parse_from(["text2qr", "hello world"]);
        assert_eq!(args.text, "hello world");
    }

    #[test]
    fn test_args_text_after_double_dash() {
        let args = Args::parse_from(["text2qr", "--", "-not-a-flag"]);
        assert_eq!(args.text, "-not-a-flag");
    }

    #[test]
    fn test_args_hyphen_led_text() {
        let args = Args::parse_from(["text2qr", "-5"]);
        assert_eq!(args.text, "-5");

        let args = Args::parse_from(["text2qr", "--hello"]);
        assert_eq!(args.text, "--hello");

        let args = Args::parse_from(["text2qr", "-x"]);
        assert_eq!(args.text, "-x");
    }

    #[test]
    fn test_args_known_flags_still_parse_before_text() {
        let args = Args::parse_from(["text2qr", "-v", "-5"]);
        assert_eq!(args.verbose, 1);
        assert_eq!(args.text, "-5");

        let args = Args::parse_from(["text2qr", "--no-console", "HELLO"]);
        assert!(args.no_console);
        assert_eq!(args.text, "HELLO");
    }

    #[test]
    fn test_args_output_option() {
        let args = Args::parse_from(["text2qr", "-o", "/tmp/a.png", "x"]);
        assert_eq!(args.output, Some(PathBuf::from("/tmp/a.png")));

        let args = Args::parse_from(["text2qr", "--output", "b.png", "x"]);
        assert_eq!(args.output, Some(PathBuf::from("b.png")));
    }

    #[test]
    fn test_args_size_values() {
        let args = Args::parse_from(["text2qr", "--size", "600", "x"]);
        assert_eq!(args.size, Some(600));

        assert!(Args::try_parse_from(["text2qr", "--size", "0", "x"]).is_err());
        assert!(Args::try_parse_from(["text2qr", "--size", "4097", "x"]).is_err());
        assert!(Args::try_parse_from(["text2qr", "--size", "big", "x"]).is_err());
    }

    #[test]
    fn test_args_border_values() {
        let args = Args::parse_from(["text2qr", "-b", "0", "x"]);
        assert_eq!(args.border, Some(0));

        assert!(Args::try_parse_from(["text2qr", "--border", "17", "x"]).is_err());
    }

    #[test]
    fn test_args_verbose_and_quiet_conflict() {
        assert!(Args::try_parse_from(["text2qr", "-v", "-q", "x"]).is_err());
    }

    #[test]
    fn test_log_level() {
        let args = Args::parse_from(["text2qr", "x"]);
        assert_eq!(args.log_level(LevelFilter::Warn), LevelFilter::Warn);
        assert_eq!(args.log_level(LevelFilter::Off), LevelFilter::Off);

        let args = Args::parse_from(["text2qr", "-v", "x"]);
        assert_eq!(args.log_level(LevelFilter::Warn), LevelFilter::Info);

        let args = Args::parse_from(["text2qr", "-vv", "x"]);
        assert_eq!(args.log_level(LevelFilter::Warn), LevelFilter::Debug);

        let args = Args::parse_from(["text2qr", "-vvv", "x"]);
        assert_eq!(args.log_level(LevelFilter::Warn), LevelFilter::Trace);

        let args = Args::parse_from(["text2qr", "-q", "x"]);
        assert_eq!(args.log_level(LevelFilter::Info), LevelFilter::Error);
    }

    #[test]
    fn test_settings_cli_overrides_config() {
        let config = Config::parse(
            "[output]\npath = \"cfg.png\"\nsize = 500\n[render]\nborder = 3\n",
        )
        .unwrap();

        let args = Args::parse_from(["text2qr", "x"]);
        let settings = args.settings(&config);
        assert_eq!(settings.output, PathBuf::from("cfg.png"));
        assert_eq!(settings.size, 500);
        assert_eq!(settings.border, 3);
        assert!(settings.console);

        let args = Args::parse_from(["text2qr", "-o", "cli.png", "-s", "200", "x"]);
        let settings = args.settings(&config);
        assert_eq!(settings.output, PathBuf::from("cli.png"));
        assert_eq!(settings.size, 200);
        assert_eq!(settings.border, 3);
    }

    #[test]
    fn test_settings_console_disabled_by_either_source() {
        let quiet_config = Config::parse("[render]\nconsole = false\n").unwrap();
        let args = Args::parse_from(["text2qr", "x"]);
        assert!(!args.settings(&quiet_config).console);

        let args = Args::parse_from(["text2qr", "--no-console", "x"]);
        assert!(!args.settings(&Config::default()).console);
    }
}
