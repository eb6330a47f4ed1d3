//! Board structures for slot occupancy and free-form card placement.
//!
//! # Responsibility
//! - Track which slot holds which card on the catalogue board.
//! - Track the unordered card set on the composition board.
//!
//! # Invariants
//! - Catalogue-board slots mirror the catalogue: one slot per archetype, in
//!   catalogue order, never reordered or resized after construction.
//! - A slot's occupant, when present, refers to a composition-board card
//!   whose archetype matches the slot's (maintained by the placement engine).

pub mod catalogue_board;
pub mod composition_board;
pub mod slot;

pub use catalogue_board::{CatalogueBoard, SlotAnchor};
pub use composition_board::CompositionBoard;
pub use slot::Slot;
