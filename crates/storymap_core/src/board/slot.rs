//! One board position permanently bound to one archetype.

use crate::model::archetype::ArchetypeDescriptor;
use crate::model::card::{Card, CardId};

/// A permanent board position for one archetype.
///
/// Every slot carries a seed card: the always-visible, never-draggable
/// placeholder that renders the slot's baseline appearance and is duplicated
/// when the user first drags this function out of the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    archetype: ArchetypeDescriptor,
    seed: Card,
    occupant: Option<CardId>,
}

impl Slot {
    /// Creates an empty slot for the given archetype, spawning its seed card.
    pub fn new(archetype: ArchetypeDescriptor) -> Self {
        let seed = Card::spawn(archetype.clone());
        Self {
            archetype,
            seed,
            occupant: None,
        }
    }

    /// The archetype this slot is permanently bound to.
    pub fn archetype(&self) -> &ArchetypeDescriptor {
        &self.archetype
    }

    /// The slot's permanent seed card.
    pub fn seed(&self) -> &Card {
        &self.seed
    }

    /// The currently bound card, if any.
    pub fn occupant(&self) -> Option<CardId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub(crate) fn bind(&mut self, card: CardId) {
        self.occupant = Some(card);
    }

    pub(crate) fn clear(&mut self) -> Option<CardId> {
        self.occupant.take()
    }
}

#[cfg(test)]
mod tests {
    use super::Slot;
    use crate::model::archetype::ArchetypeDescriptor;
    use crate::model::card::Card;

    fn struggle() -> ArchetypeDescriptor {
        ArchetypeDescriptor::new("H", "Struggle", "The Big Fight", "d", "s", "struggle.png")
    }

    #[test]
    fn new_slot_is_empty_with_matching_seed() {
        let slot = Slot::new(struggle());
        assert!(!slot.is_occupied());
        assert!(slot.seed().archetype().matches(slot.archetype()));
    }

    #[test]
    fn bind_and_clear_track_the_occupant() {
        let mut slot = Slot::new(struggle());
        let card = Card::spawn(struggle());

        slot.bind(card.id);
        assert_eq!(slot.occupant(), Some(card.id));

        assert_eq!(slot.clear(), Some(card.id));
        assert!(!slot.is_occupied());
    }
}
