//! Versioned binary encoding of an inventory.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic u32 = 0x4344_4956 | format_version u16 | count u32
//! count x ( id i64 | title_len u32 | title utf8 | artist_len u32 | artist utf8 )
//! crc32 u32 over every preceding byte
//! ```

use super::{StorageError, StorageResult};
use crate::model::record::CdRecord;
use crate::store::inventory::Inventory;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher as Crc32;
use std::io::{self, Cursor, Read};

/// "CDIV" read as a little-endian `u32` tag.
pub const INVENTORY_MAGIC: u32 = 0x4344_4956;
/// Latest format version written by this binary.
pub const FORMAT_VERSION: u16 = 1;

const HEADER_SIZE: usize = 4 + 2 + 4;
const CRC_SIZE: usize = 4;
// id(8) + title_len(4) + artist_len(4)
const MIN_RECORD_SIZE: usize = 8 + 4 + 4;

/// Encodes the full ordered inventory into a self-contained blob.
///
/// # Errors
/// - Returns `FieldTooLong` when a title or artist exceeds `u32::MAX` bytes.
pub fn encode(inventory: &Inventory) -> StorageResult<Vec<u8>> {
    let count = u32::try_from(inventory.len()).map_err(|_| StorageError::FieldTooLong {
        field: "record count",
        len: inventory.len(),
    })?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + CRC_SIZE + inventory.len() * MIN_RECORD_SIZE);
    buf.write_u32::<LittleEndian>(INVENTORY_MAGIC)?;
    buf.write_u16::<LittleEndian>(FORMAT_VERSION)?;
    buf.write_u32::<LittleEndian>(count)?;

    for record in inventory {
        buf.write_i64::<LittleEndian>(record.id)?;
        write_text(&mut buf, "title", &record.title)?;
        write_text(&mut buf, "artist", &record.artist)?;
    }

    let mut hasher = Crc32::new();
    hasher.update(&buf);
    buf.write_u32::<LittleEndian>(hasher.finalize())?;

    Ok(buf)
}

/// Decodes a blob produced by [`encode`].
///
/// # Errors
/// - `Corrupt` on bad magic, truncation, checksum mismatch, invalid UTF-8,
///   oversized length prefixes or trailing bytes.
/// - `UnsupportedFormatVersion` when the blob was written by a newer format.
pub fn decode(bytes: &[u8]) -> StorageResult<Inventory> {
    if bytes.len() < HEADER_SIZE + CRC_SIZE {
        return Err(corrupt(format!(
            "truncated: {} bytes is shorter than the {} byte envelope",
            bytes.len(),
            HEADER_SIZE + CRC_SIZE
        )));
    }

    let (body, crc_bytes) = bytes.split_at(bytes.len() - CRC_SIZE);
    let mut rdr = Cursor::new(body);

    let magic = rdr.read_u32::<LittleEndian>().map_err(truncated)?;
    if magic != INVENTORY_MAGIC {
        return Err(corrupt(format!("unexpected magic {magic:#010x}")));
    }

    let version = rdr.read_u16::<LittleEndian>().map_err(truncated)?;
    if version > FORMAT_VERSION {
        return Err(StorageError::UnsupportedFormatVersion {
            file_version: version,
            latest_supported: FORMAT_VERSION,
        });
    }
    if version == 0 {
        return Err(corrupt("format version 0 is not valid".to_string()));
    }

    let stored_crc = Cursor::new(crc_bytes)
        .read_u32::<LittleEndian>()
        .map_err(truncated)?;
    let mut hasher = Crc32::new();
    hasher.update(body);
    let actual_crc = hasher.finalize();
    if stored_crc != actual_crc {
        return Err(corrupt(format!(
            "checksum mismatch: stored {stored_crc:#010x}, computed {actual_crc:#010x}"
        )));
    }

    let count = rdr.read_u32::<LittleEndian>().map_err(truncated)? as usize;
    let remaining = body.len() - HEADER_SIZE;
    if count > remaining / MIN_RECORD_SIZE {
        return Err(corrupt(format!(
            "record count {count} does not fit into {remaining} payload bytes"
        )));
    }

    let mut records = Vec::with_capacity(count);
    for index in 0..count {
        let id = rdr.read_i64::<LittleEndian>().map_err(truncated)?;
        let title = read_text(&mut rdr, index, "title")?;
        let artist = read_text(&mut rdr, index, "artist")?;
        records.push(CdRecord { id, title, artist });
    }

    let consumed = rdr.position() as usize;
    if consumed != body.len() {
        return Err(corrupt(format!(
            "{} trailing bytes after {count} records",
            body.len() - consumed
        )));
    }

    Ok(Inventory::from_records(records))
}

fn write_text(buf: &mut Vec<u8>, field: &'static str, value: &str) -> StorageResult<()> {
    let len = u32::try_from(value.len()).map_err(|_| StorageError::FieldTooLong {
        field,
        len: value.len(),
    })?;
    buf.write_u32::<LittleEndian>(len)?;
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

fn read_text(rdr: &mut Cursor<&[u8]>, index: usize, field: &str) -> StorageResult<String> {
    let len = rdr.read_u32::<LittleEndian>().map_err(truncated)? as usize;
    let available = rdr.get_ref().len() - rdr.position() as usize;
    if len > available {
        return Err(corrupt(format!(
            "record {index} {field} length {len} exceeds {available} remaining bytes"
        )));
    }

    let mut raw = vec![0u8; len];
    rdr.read_exact(&mut raw).map_err(truncated)?;
    String::from_utf8(raw)
        .map_err(|_| corrupt(format!("record {index} {field} is not valid UTF-8")))
}

fn truncated(err: io::Error) -> StorageError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        corrupt("truncated payload".to_string())
    } else {
        StorageError::Io(err)
    }
}

fn corrupt(message: String) -> StorageError {
    StorageError::Corrupt(message)
}
