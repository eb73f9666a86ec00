//! Whole-file read/write of the persisted inventory.
//!
//! # Responsibility
//! - Open, use and close the inventory file within a single call.
//! - Map a missing file to `StorageError::NotFound` so callers can recover.
//! - Create an empty inventory file when none exists at startup.
//!
//! # Invariants
//! - No file handle outlives the call that opened it.
//! - Logged events carry sizes and counts only, never record text.

use super::codec::{decode, encode};
use super::{StorageError, StorageResult};
use crate::store::inventory::Inventory;
use log::{error, info, warn};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// How `open_inventory` obtained its inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenSource {
    /// Decoded from an existing file.
    Loaded,
    /// No file existed; an empty inventory was written to disk.
    Bootstrapped,
}

/// Reads and decodes the whole inventory file at `path`.
///
/// # Errors
/// - `NotFound` when `path` does not exist.
/// - `Corrupt` or `UnsupportedFormatVersion` when the blob cannot be decoded.
/// - `Io` for any other file-system failure.
pub fn read_inventory(path: impl AsRef<Path>) -> StorageResult<Inventory> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!("event=inventory_read module=storage status=start");

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            warn!(
                "event=inventory_read module=storage status=not_found duration_ms={}",
                started_at.elapsed().as_millis()
            );
            return Err(StorageError::NotFound(path.to_path_buf()));
        }
        Err(err) => {
            error!(
                "event=inventory_read module=storage status=error duration_ms={} error_code=read_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match decode(&bytes) {
        Ok(inventory) => {
            info!(
                "event=inventory_read module=storage status=ok bytes={} records={} duration_ms={}",
                bytes.len(),
                inventory.len(),
                started_at.elapsed().as_millis()
            );
            Ok(inventory)
        }
        Err(err) => {
            error!(
                "event=inventory_read module=storage status=error bytes={} duration_ms={} error_code=decode_failed error={}",
                bytes.len(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Encodes `inventory` and overwrites the file at `path` with it.
///
/// # Side effects
/// - Prior file contents are destroyed; a crash mid-write can leave a
///   truncated file that later reads report as `Corrupt`.
pub fn write_inventory(path: impl AsRef<Path>, inventory: &Inventory) -> StorageResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=inventory_write module=storage status=start records={}",
        inventory.len()
    );

    let bytes = encode(inventory)?;
    let result = File::create(path).and_then(|mut file| {
        file.write_all(&bytes)?;
        file.sync_all()
    });

    match result {
        Ok(()) => {
            info!(
                "event=inventory_write module=storage status=ok bytes={} duration_ms={}",
                bytes.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=inventory_write module=storage status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}

/// Loads the inventory for a new session, creating the file when absent.
///
/// # Errors
/// - Every `read_inventory` failure other than `NotFound` is returned as is.
/// - Write failures while bootstrapping the empty file are returned.
pub fn open_inventory(path: impl AsRef<Path>) -> StorageResult<(Inventory, OpenSource)> {
    let path = path.as_ref();
    match read_inventory(path) {
        Ok(inventory) => Ok((inventory, OpenSource::Loaded)),
        Err(StorageError::NotFound(_)) => {
            let inventory = Inventory::new();
            write_inventory(path, &inventory)?;
            info!("event=inventory_bootstrap module=storage status=ok");
            Ok((inventory, OpenSource::Bootstrapped))
        }
        Err(err) => Err(err),
    }
}
