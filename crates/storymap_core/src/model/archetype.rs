//! Archetype descriptor value type.
//!
//! # Responsibility
//! - Hold the immutable description of one narrative function.
//! - Provide the single matching predicate used across the crate.
//!
//! # Invariants
//! - Matching identity is the canonical name alone; every other field is
//!   presentation data.
//! - Descriptors are never mutated after construction; `detached()` produces
//!   an identity-free copy for persistence.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Immutable description of one narrative function.
///
/// Two descriptors describe the same function iff their canonical names are
/// equal; symbol, display text and image play no part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchetypeDescriptor {
    /// Short symbolic key (e.g. a Propp symbol).
    pub symbol: String,
    /// Matching identity. Must be non-blank and unique within a catalogue.
    pub canonical_name: String,
    /// User-facing name shown on cards.
    pub display_name: String,
    /// Long-form description text.
    pub description: String,
    /// Short-form description text for compact card faces.
    pub short_description: String,
    /// Reference to the card illustration; resolved by the rendering host.
    pub image: String,
}

impl ArchetypeDescriptor {
    /// Creates a descriptor from owned or borrowed field values.
    pub fn new(
        symbol: impl Into<String>,
        canonical_name: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        short_description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            canonical_name: canonical_name.into(),
            display_name: display_name.into(),
            description: description.into(),
            short_description: short_description.into(),
            image: image.into(),
        }
    }

    /// Returns whether `other` describes the same function as `self`.
    ///
    /// This is the one matching predicate in the system; slot binding,
    /// duplicate detection and snapshot validation all route through it.
    pub fn matches(&self, other: &ArchetypeDescriptor) -> bool {
        self.canonical_name == other.canonical_name
    }

    /// Returns a detached copy carrying the same field values.
    ///
    /// Used when snapshotting so the persisted record never aliases live
    /// board state.
    pub fn detached(&self) -> ArchetypeDescriptor {
        self.clone()
    }

    /// Validates the matching-identity field.
    ///
    /// # Errors
    /// - `BlankCanonicalName` when the canonical name is empty or whitespace.
    pub fn validate(&self) -> Result<(), ArchetypeValidationError> {
        if self.canonical_name.trim().is_empty() {
            return Err(ArchetypeValidationError::BlankCanonicalName);
        }
        Ok(())
    }
}

/// Validation errors for archetype descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchetypeValidationError {
    BlankCanonicalName,
}

impl Display for ArchetypeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCanonicalName => {
                write!(f, "archetype canonical name must not be blank")
            }
        }
    }
}

impl Error for ArchetypeValidationError {}
