//! Runtime configuration for one inventory session.
//!
//! # Responsibility
//! - Carry the data file location and logging options from the caller.
//! - Provide defaults matching the classic single-file layout.

use crate::logging::{default_log_level, init_logging};
use std::path::PathBuf;

/// Data file used when no path is configured, relative to the working
/// directory.
pub const DEFAULT_DATA_FILE: &str = "CDInventory.dat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Persisted inventory file.
    pub data_file: PathBuf,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` disables logging.
    pub log_dir: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl InventoryConfig {
    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging is active afterwards.
    ///
    /// # Errors
    /// - Propagates `init_logging` errors unchanged.
    pub fn start_logging(&self) -> Result<bool, String> {
        match &self.log_dir {
            Some(log_dir) => init_logging(&self.log_level, log_dir).map(|()| true),
            None => Ok(false),
        }
    }
}
