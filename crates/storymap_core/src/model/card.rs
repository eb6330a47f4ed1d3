//! Card instance model.
//!
//! # Responsibility
//! - Represent one placeable card carrying exactly one archetype.
//! - Distinguish card instances so a re-dropped card is not mistaken for a
//!   second card of the same function.
//!
//! # Invariants
//! - `archetype` is fixed at construction.
//! - Highlight state is ephemeral UI state and is never persisted.

use crate::model::archetype::ArchetypeDescriptor;
use uuid::Uuid;

/// Stable instance identifier for one card.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type CardId = Uuid;

/// One placeable card bound to exactly one archetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Instance identity; matching identity lives on the archetype.
    pub id: CardId,
    archetype: ArchetypeDescriptor,
    highlighted: bool,
}

impl Card {
    /// Spawns a fresh card instance for the given archetype.
    pub fn spawn(archetype: ArchetypeDescriptor) -> Self {
        Self::with_id(Uuid::new_v4(), archetype)
    }

    /// Creates a card with a caller-provided instance id.
    pub fn with_id(id: CardId, archetype: ArchetypeDescriptor) -> Self {
        Self {
            id,
            archetype,
            highlighted: false,
        }
    }

    /// Returns the archetype this card carries.
    pub fn archetype(&self) -> &ArchetypeDescriptor {
        &self.archetype
    }

    /// Spawns a new card instance carrying the same archetype.
    ///
    /// Used when a seed card is first dragged out of the catalogue: the seed
    /// stays put and the duplicate becomes the live, draggable card.
    pub fn duplicate(&self) -> Card {
        Card::spawn(self.archetype.clone())
    }

    pub fn highlight(&mut self) {
        self.highlighted = true;
    }

    pub fn unhighlight(&mut self) {
        self.highlighted = false;
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

#[cfg(test)]
mod tests {
    use super::Card;
    use crate::model::archetype::ArchetypeDescriptor;

    fn departure() -> ArchetypeDescriptor {
        ArchetypeDescriptor::new(
            "↑",
            "Departure",
            "Setting Out",
            "The hero leaves home.",
            "The hero sets out.",
            "departure.png",
        )
    }

    #[test]
    fn spawn_sets_fresh_identity_and_defaults() {
        let card = Card::spawn(departure());
        assert!(!card.id.is_nil());
        assert!(card.archetype().matches(&departure()));
        assert!(!card.is_highlighted());
    }

    #[test]
    fn duplicate_keeps_archetype_but_not_identity() {
        let seed = Card::spawn(departure());
        let copy = seed.duplicate();
        assert_ne!(copy.id, seed.id);
        assert!(copy.archetype().matches(seed.archetype()));
    }

    #[test]
    fn highlight_state_toggles() {
        let mut card = Card::spawn(departure());
        card.highlight();
        assert!(card.is_highlighted());
        card.unhighlight();
        assert!(!card.is_highlighted());
    }
}
