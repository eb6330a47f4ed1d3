//! Domain model for archetypes and placeable cards.
//!
//! # Responsibility
//! - Define the immutable archetype descriptor and its matching predicate.
//! - Define the card instance model shared by both board variants.
//!
//! # Invariants
//! - "Same function" comparisons always go through
//!   `ArchetypeDescriptor::matches`; never structural or id equality.
//! - A card's archetype is fixed at construction and never changes.

pub mod archetype;
pub mod card;
