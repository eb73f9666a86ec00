//! Terminal entry point for the CD inventory.
//!
//! # Responsibility
//! - Parse command-line options into an `InventoryConfig`.
//! - Run one shell session on stdin/stdout.
//! - Map fatal errors to a non-zero exit code.

use cd_inventory_core::{core_version, InventoryConfig, Shell, DEFAULT_DATA_FILE};
use clap::Parser;
use log::error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Manage a CD inventory stored in a single file", long_about = None)]
struct Args {
    /// Inventory data file
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> InventoryConfig {
        let defaults = InventoryConfig::default();
        InventoryConfig {
            data_file: self.file,
            log_level: self.log_level.unwrap_or(defaults.log_level),
            log_dir: self.log_dir,
        }
    }
}

fn main() -> ExitCode {
    let config = Args::parse().into_config();

    if let Err(err) = config.start_logging() {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    println!("CD Inventory {}", core_version());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = Shell::open(&config.data_file, stdin.lock(), stdout.lock())
        .and_then(|mut shell| shell.run());

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=app_exit module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
