//! CD record domain model.
//!
//! # Responsibility
//! - Define the unit of inventory (`id`, `title`, `artist`).
//! - Parse user-supplied identifier text into a `CdId`.
//!
//! # Invariants
//! - A record carries exactly three fields; there are no timestamps or
//!   tombstones.
//! - Two records may share an `id`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;

/// Numeric identifier typed in by the user.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CdId = i64;

/// Identifier text that could not be coerced to an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCdId {
    /// Trimmed input exactly as the user typed it.
    pub input: String,
    reason: ParseIntError,
}

impl Display for InvalidCdId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid CD id `{}`: {}", self.input, self.reason)
    }
}

impl Error for InvalidCdId {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.reason)
    }
}

/// Parses identifier text, ignoring surrounding whitespace.
///
/// # Errors
/// - Returns `InvalidCdId` when the trimmed text is not a base-10 integer
///   that fits into `CdId`.
pub fn parse_cd_id(text: &str) -> Result<CdId, InvalidCdId> {
    let trimmed = text.trim();
    trimmed.parse::<CdId>().map_err(|reason| InvalidCdId {
        input: trimmed.to_string(),
        reason,
    })
}

/// One inventory entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CdRecord {
    pub id: CdId,
    pub title: String,
    pub artist: String,
}

impl CdRecord {
    pub fn new(id: CdId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
        }
    }
}
