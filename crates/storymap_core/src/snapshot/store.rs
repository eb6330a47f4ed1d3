//! Whole-file persistence for board snapshots.
//!
//! # Responsibility
//! - Serialize a snapshot record as a JSON document wrapped in a named
//!   `card_store` container.
//! - Read only well-formed documents of that exact shape; anything else
//!   fails closed with the caller's in-memory state untouched.
//!
//! # Invariants
//! - Slot order in the document is catalogue order, preserved both
//!   directions.
//! - Nothing is written beyond the serialized document.

use crate::snapshot::{BoardSnapshot, SnapshotResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The on-disk document shape: one named container wrapping the record.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SnapshotDocument {
    card_store: BoardSnapshot,
}

/// Writes a snapshot record to a file as a whole document.
///
/// # Errors
/// Returns `SnapshotError::Malformed` when the record fails validation and
/// `SnapshotError::Io` when the file cannot be written.
pub fn save_snapshot(record: &BoardSnapshot, path: impl AsRef<Path>) -> SnapshotResult<()> {
    record.validate()?;
    let document = SnapshotDocument {
        card_store: record.clone(),
    };
    let json = serde_json::to_string_pretty(&document)?;
    std::fs::write(path.as_ref(), json)?;
    info!(
        "event=snapshot_save module=snapshot status=ok slots={} occupied={}",
        record.slots.len(),
        record.occupied_count()
    );
    Ok(())
}

/// Reads a snapshot record from a file written by [`save_snapshot`].
///
/// # Errors
/// Returns `SnapshotError::Io` when the file cannot be read and
/// `SnapshotError::Malformed` for any document that is not exactly the
/// expected shape (missing wrapper, unknown fields, wrong element types,
/// unsupported version).
pub fn load_snapshot(path: impl AsRef<Path>) -> SnapshotResult<BoardSnapshot> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_snapshot(&text)
}

/// Parses a snapshot document from text.
pub fn parse_snapshot(text: &str) -> SnapshotResult<BoardSnapshot> {
    let document: SnapshotDocument = serde_json::from_str(text)?;
    document.card_store.validate()?;
    Ok(document.card_store)
}
