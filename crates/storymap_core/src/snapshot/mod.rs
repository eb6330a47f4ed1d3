//! Snapshot record types for whole-board save/restore.
//!
//! # Responsibility
//! - Define the versioned, detached record of full placement state.
//! - Validate records structurally before any restore touches live state.
//!
//! # Invariants
//! - Records never alias live board state; every descriptor is a detached
//!   copy.
//! - Slot order in the record is catalogue order and is preserved both
//!   directions.
//! - Validation is all-or-nothing: a record that fails any check is rejected
//!   whole.

use crate::model::archetype::ArchetypeDescriptor;
use crate::placement::IntegrityViolation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod store;

/// Format version written into every snapshot record.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot capture/restore/store errors.
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    /// Structurally invalid record or document; the board is left untouched.
    Malformed(String),
    /// Cross-board invariant found broken at capture time.
    Integrity(IntegrityViolation),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot file i/o failed: {err}"),
            Self::Malformed(message) => write!(f, "malformed snapshot: {message}"),
            Self::Integrity(violation) => {
                write!(f, "board state failed integrity check: {violation}")
            }
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Integrity(violation) => Some(violation),
            Self::Malformed(_) => None,
        }
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value.to_string())
    }
}

/// Persisted state of one placed card.
///
/// Card-local mutable state worth persisting would live here; today the
/// detached archetype copy is the whole record, but the struct keeps the
/// shape versionable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardSnapshot {
    pub function: ArchetypeDescriptor,
}

/// Persisted state of one slot: its function plus an optional card.
///
/// Every slot record carries its function so a restore can rebuild the slot
/// sequence from the record alone; an empty slot is `card: None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotSnapshot {
    pub function: ArchetypeDescriptor,
    pub card: Option<CardSnapshot>,
}

impl SlotSnapshot {
    pub fn is_occupied(&self) -> bool {
        self.card.is_some()
    }
}

/// Detached record of the full placement state of a board pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoardSnapshot {
    pub version: u32,
    pub slots: Vec<SlotSnapshot>,
}

impl BoardSnapshot {
    /// Number of occupied slot records.
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_occupied()).count()
    }

    /// Validates record structure without touching any board.
    ///
    /// # Errors
    /// Returns `SnapshotError::Malformed` on an unsupported version, an empty
    /// slot list, a blank or duplicate canonical name, or an occupied entry
    /// whose card does not match its slot's function.
    pub fn validate(&self) -> SnapshotResult<()> {
        if self.version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::Malformed(format!(
                "unsupported snapshot format version {} (supported: {})",
                self.version, SNAPSHOT_FORMAT_VERSION
            )));
        }
        if self.slots.is_empty() {
            return Err(SnapshotError::Malformed(
                "snapshot contains no slot records".to_string(),
            ));
        }

        let mut seen = BTreeSet::new();
        for (index, slot) in self.slots.iter().enumerate() {
            slot.function.validate().map_err(|err| {
                SnapshotError::Malformed(format!("slot record {index}: {err}"))
            })?;
            if !seen.insert(slot.function.canonical_name.clone()) {
                return Err(SnapshotError::Malformed(format!(
                    "duplicate canonical name `{}` at slot record {index}",
                    slot.function.canonical_name
                )));
            }
            if let Some(card) = &slot.card {
                card.function.validate().map_err(|err| {
                    SnapshotError::Malformed(format!("card record {index}: {err}"))
                })?;
                if !card.function.matches(&slot.function) {
                    return Err(SnapshotError::Malformed(format!(
                        "slot record {index} of function `{}` holds a card of function `{}`",
                        slot.function.canonical_name, card.function.canonical_name
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        BoardSnapshot, CardSnapshot, SlotSnapshot, SnapshotError, SNAPSHOT_FORMAT_VERSION,
    };
    use crate::model::archetype::ArchetypeDescriptor;

    fn descriptor(name: &str) -> ArchetypeDescriptor {
        ArchetypeDescriptor::new("x", name, name, "d", "s", "card.png")
    }

    fn empty_slot(name: &str) -> SlotSnapshot {
        SlotSnapshot {
            function: descriptor(name),
            card: None,
        }
    }

    fn occupied_slot(name: &str) -> SlotSnapshot {
        SlotSnapshot {
            function: descriptor(name),
            card: Some(CardSnapshot {
                function: descriptor(name),
            }),
        }
    }

    #[test]
    fn well_formed_record_validates() {
        let record = BoardSnapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            slots: vec![empty_slot("Villainy"), occupied_slot("Departure")],
        };
        record.validate().unwrap();
        assert_eq!(record.occupied_count(), 1);
    }

    #[test]
    fn unsupported_version_is_malformed() {
        let record = BoardSnapshot {
            version: 99,
            slots: vec![empty_slot("Villainy")],
        };
        assert!(matches!(
            record.validate().unwrap_err(),
            SnapshotError::Malformed(_)
        ));
    }

    #[test]
    fn empty_slot_list_is_malformed() {
        let record = BoardSnapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            slots: Vec::new(),
        };
        assert!(matches!(
            record.validate().unwrap_err(),
            SnapshotError::Malformed(_)
        ));
    }

    #[test]
    fn duplicate_slot_functions_are_malformed() {
        let record = BoardSnapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            slots: vec![empty_slot("Villainy"), empty_slot("Villainy")],
        };
        assert!(matches!(
            record.validate().unwrap_err(),
            SnapshotError::Malformed(message) if message.contains("Villainy")
        ));
    }

    #[test]
    fn card_not_matching_its_slot_is_malformed() {
        let mut slot = occupied_slot("Villainy");
        slot.card = Some(CardSnapshot {
            function: descriptor("Wedding"),
        });
        let record = BoardSnapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            slots: vec![slot],
        };
        assert!(matches!(
            record.validate().unwrap_err(),
            SnapshotError::Malformed(message) if message.contains("Wedding")
        ));
    }
}
