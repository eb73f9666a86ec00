//! Core logic for the CD inventory manager.
//! This crate is the single source of truth for inventory behavior; the CLI
//! only wires it to a terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod shell;
pub mod storage;
pub mod store;

pub use config::{InventoryConfig, DEFAULT_DATA_FILE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{parse_cd_id, CdId, CdRecord, InvalidCdId};
pub use shell::{Command, SessionEnd, Shell, ShellError, ShellResult};
pub use storage::{
    open_inventory, read_inventory, write_inventory, OpenSource, StorageError, StorageResult,
};
pub use store::inventory::{DeleteOutcome, Inventory};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
