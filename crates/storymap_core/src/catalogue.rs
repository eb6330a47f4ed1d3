//! Archetype catalogue loading and validation.
//!
//! # Responsibility
//! - Load the fixed, ordered universe of narrative functions.
//! - Reject malformed catalogue sources before any slot is built.
//!
//! # Invariants
//! - Catalogue order is source order and never changes after load.
//! - Canonical names are non-blank and unique; violations are fatal load
//!   errors and no partial catalogue is ever exposed.

use crate::model::archetype::{ArchetypeDescriptor, ArchetypeValidationError};
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// The built-in function set, one entry per Propp narrative function.
const BUILTIN_FUNCTIONS_JSON: &str = include_str!("data/functions.json");

pub type CatalogueResult<T> = Result<T, CatalogueError>;

/// Fatal catalogue load errors.
#[derive(Debug)]
pub enum CatalogueError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Empty,
    InvalidDescriptor {
        position: usize,
        source: ArchetypeValidationError,
    },
    DuplicateCanonicalName(String),
}

impl Display for CatalogueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "catalogue source is unreadable: {err}"),
            Self::Parse(err) => write!(f, "catalogue source is malformed: {err}"),
            Self::Empty => write!(f, "catalogue source contains no functions"),
            Self::InvalidDescriptor { position, source } => {
                write!(f, "catalogue entry {position} is invalid: {source}")
            }
            Self::DuplicateCanonicalName(name) => {
                write!(f, "catalogue contains duplicate canonical name: {name}")
            }
        }
    }
}

impl Error for CatalogueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::InvalidDescriptor { source, .. } => Some(source),
            Self::Empty | Self::DuplicateCanonicalName(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogueError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CatalogueError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Immutable, ordered list of archetype descriptors.
///
/// Defines the fixed universe of slots for a session; constructed once and
/// never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogue {
    functions: Vec<ArchetypeDescriptor>,
}

impl Catalogue {
    /// Loads the built-in Propp function set shipped with the crate.
    pub fn builtin() -> CatalogueResult<Self> {
        Self::from_json_str(BUILTIN_FUNCTIONS_JSON)
    }

    /// Parses a catalogue from a JSON array of descriptors.
    pub fn from_json_str(json: &str) -> CatalogueResult<Self> {
        let functions: Vec<ArchetypeDescriptor> = serde_json::from_str(json)?;
        Self::from_functions(functions)
    }

    /// Loads a catalogue from a JSON file on disk.
    pub fn load_from_file(path: impl AsRef<Path>) -> CatalogueResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Builds a catalogue from already-parsed descriptors.
    ///
    /// # Errors
    /// - `Empty` when no descriptors are given.
    /// - `InvalidDescriptor` when an entry fails validation.
    /// - `DuplicateCanonicalName` when two entries share matching identity.
    pub fn from_functions(functions: Vec<ArchetypeDescriptor>) -> CatalogueResult<Self> {
        if functions.is_empty() {
            return Err(CatalogueError::Empty);
        }

        let mut seen = BTreeSet::new();
        for (position, function) in functions.iter().enumerate() {
            function
                .validate()
                .map_err(|source| CatalogueError::InvalidDescriptor { position, source })?;
            if !seen.insert(function.canonical_name.clone()) {
                return Err(CatalogueError::DuplicateCanonicalName(
                    function.canonical_name.clone(),
                ));
            }
        }

        info!(
            "event=catalogue_load module=catalogue status=ok functions={}",
            functions.len()
        );
        Ok(Self { functions })
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Returns descriptors in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &ArchetypeDescriptor> {
        self.functions.iter()
    }

    /// Returns the descriptor at a catalogue position.
    pub fn get(&self, index: usize) -> Option<&ArchetypeDescriptor> {
        self.functions.get(index)
    }

    /// Finds a descriptor by canonical name.
    pub fn find(&self, canonical_name: &str) -> Option<&ArchetypeDescriptor> {
        self.functions
            .iter()
            .find(|function| function.canonical_name == canonical_name)
    }
}
