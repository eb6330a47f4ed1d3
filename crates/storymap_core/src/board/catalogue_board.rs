//! The fixed board exposing one slot per catalogue archetype.
//!
//! # Responsibility
//! - Build the ordered slot sequence from the catalogue.
//! - Answer slot lookups through the archetype matching predicate.
//!
//! # Invariants
//! - Slot archetypes are exactly the catalogue, in catalogue order.
//! - Slots are never reordered or resized after construction (wholesale
//!   replacement during a restore excepted).

use crate::board::slot::Slot;
use crate::catalogue::Catalogue;
use crate::model::archetype::ArchetypeDescriptor;
use crate::model::card::{Card, CardId};

/// Abstract position handle for one slot, in catalogue order.
///
/// The rendering host maps anchors to concrete geometry; the core never
/// deals in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAnchor(pub usize);

/// The catalogue board: an ordered slot sequence, one per archetype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueBoard {
    slots: Vec<Slot>,
}

impl CatalogueBoard {
    /// Builds the board from a catalogue, one empty slot per entry.
    pub fn new(catalogue: &Catalogue) -> Self {
        let slots = catalogue
            .iter()
            .map(|function| Slot::new(function.detached()))
            .collect();
        Self { slots }
    }

    /// Builds the board from pre-constructed slots (restore path).
    pub(crate) fn from_slots(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All slots, in catalogue order.
    pub fn all_slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Slots currently bound to a card, in catalogue order.
    pub fn occupied_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.is_occupied())
    }

    /// Position of the slot matching the given archetype.
    pub fn slot_index(&self, archetype: &ArchetypeDescriptor) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.archetype().matches(archetype))
    }

    /// The slot matching the given archetype.
    pub fn find_slot(&self, archetype: &ArchetypeDescriptor) -> Option<&Slot> {
        self.slots
            .iter()
            .find(|slot| slot.archetype().matches(archetype))
    }

    pub(crate) fn find_slot_mut(&mut self, archetype: &ArchetypeDescriptor) -> Option<&mut Slot> {
        self.slots
            .iter_mut()
            .find(|slot| slot.archetype().matches(archetype))
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Slot> {
        self.slots.get_mut(index)
    }

    /// The anchor of the slot matching the given archetype.
    pub fn anchor_of(&self, archetype: &ArchetypeDescriptor) -> Option<SlotAnchor> {
        self.slot_index(archetype).map(SlotAnchor)
    }

    /// Resolves a card id to the seed card carrying it, if any.
    pub fn seed_for(&self, card: CardId) -> Option<&Card> {
        self.slots
            .iter()
            .map(Slot::seed)
            .find(|seed| seed.id == card)
    }
}
