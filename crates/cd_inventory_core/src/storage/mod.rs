//! Persisted inventory file: binary codec and whole-file access.
//!
//! # Responsibility
//! - Encode the full ordered inventory into one versioned, checksummed blob.
//! - Read and write that blob with one blocking open/use/close per call.
//! - Bootstrap an empty file on first start.
//!
//! # Invariants
//! - Writes overwrite the target unconditionally; there is no atomic swap or
//!   backup.
//! - A blob that fails any structural check is reported as `Corrupt`, never
//!   partially loaded.
//! - Files written by a newer format version are rejected, not guessed at.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod codec;
mod file;

pub use file::{open_inventory, read_inventory, write_inventory, OpenSource};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io(io::Error),
    NotFound(PathBuf),
    Corrupt(String),
    UnsupportedFormatVersion {
        file_version: u16,
        latest_supported: u16,
    },
    FieldTooLong {
        field: &'static str,
        len: usize,
    },
}

impl StorageError {
    /// Whether the session must stop instead of recovering locally.
    ///
    /// Only a missing file is recoverable: startup bootstraps it and an
    /// explicit reload reports it and keeps the in-memory inventory.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::NotFound(_))
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::NotFound(path) => write!(f, "inventory file not found: {}", path.display()),
            Self::Corrupt(message) => write!(f, "corrupt inventory data: {message}"),
            Self::UnsupportedFormatVersion {
                file_version,
                latest_supported,
            } => write!(
                f,
                "inventory format version {file_version} is newer than supported {latest_supported}"
            ),
            Self::FieldTooLong { field, len } => {
                write!(f, "{field} is too long to store ({len} bytes)")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::NotFound(_)
            | Self::Corrupt(_)
            | Self::UnsupportedFormatVersion { .. }
            | Self::FieldTooLong { .. } => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
