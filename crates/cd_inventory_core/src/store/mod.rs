//! In-memory record store.
//!
//! # Responsibility
//! - Hold the ordered inventory for one shell session.
//! - Apply add/delete mutations without touching the persisted file.
//!
//! # Invariants
//! - Insertion order is preserved; nothing sorts or deduplicates records.
//! - Mutations report a status value and never print.

pub mod inventory;
