use std::process::ExitCode;

use clap::Parser;
use log::Log;

use text2qr::cli::Args;
use text2qr::config::{Config, ConfigError};
use text2qr::logging::{Logger, DEFAULT_LEVEL};
use text2qr::pipeline;

/// Load the config file named on the command line, or the default one.
fn load_config(args: &Args) -> Result<Config, ConfigError> {
    match &args.config {
        Some(path) => Config::load_from_explicit(path),
        None => Config::load(),
    }
}

fn main() -> ExitCode {
    // Exits with status 2 and a usage message on bad arguments
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(c) => c,
        Err(e) => {
            let logger = Logger::stderr(args.log_level(DEFAULT_LEVEL));
            log::warn!(
                logger: &logger,
                path:% = e.path().display(),
                error:% = e;
                "load config failure"
            );
            logger.flush();
            return ExitCode::FAILURE;
        }
    };

    let logger = Logger::stderr(args.log_level(config.log_level()));
    let settings = args.settings(&config);

    let mut stdout = std::io::stdout().lock();
    let result = pipeline::run(&args.text, &settings, &logger, &mut stdout);

    match result {
        Ok(outcome) => {
            log::debug!(
                logger: &logger,
                version = outcome.version,
                modules = outcome.modules,
                filename:% = outcome.output.display();
                "run complete"
            );
            logger.flush();
            ExitCode::SUCCESS
        }
        Err(_) => {
            logger.flush();
            ExitCode::FAILURE
        }
    }
}
