//! Domain model for the CD inventory.
//!
//! # Responsibility
//! - Define the record shape shared by the store, the codec and the shell.
//! - Own identifier parsing so every input path validates ids the same way.
//!
//! # Invariants
//! - Identifiers are plain integers; uniqueness is not enforced anywhere.
//! - Title and artist are free text and may be empty.

pub mod record;
