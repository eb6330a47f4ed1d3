//! The free-form surface where user-arranged cards live.
//!
//! # Responsibility
//! - Hold the unordered set of cards currently in play.
//! - Answer archetype membership queries through the matching predicate.
//!
//! # Invariants
//! - At most one card per archetype is meaningful; the placement engine
//!   enforces this jointly with catalogue-board occupancy, the board itself
//!   only answers membership questions.

use crate::model::archetype::ArchetypeDescriptor;
use crate::model::card::{Card, CardId};
use std::collections::BTreeMap;

/// The composition board's card set.
///
/// Backed by an ordered map for deterministic iteration; no member ordering
/// is promised to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionBoard {
    cards: BTreeMap<CardId, Card>,
}

impl CompositionBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains_key(&card)
    }

    /// Returns whether some member card matches the given archetype.
    pub fn contains_archetype(&self, archetype: &ArchetypeDescriptor) -> bool {
        self.card_matching(archetype).is_some()
    }

    /// Returns the member card matching the given archetype, if any.
    pub fn card_matching(&self, archetype: &ArchetypeDescriptor) -> Option<&Card> {
        self.cards
            .values()
            .find(|card| card.archetype().matches(archetype))
    }

    pub fn get(&self, card: CardId) -> Option<&Card> {
        self.cards.get(&card)
    }

    /// Member cards, in unspecified order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub(crate) fn insert(&mut self, card: Card) {
        self.cards.insert(card.id, card);
    }

    pub(crate) fn remove(&mut self, card: CardId) -> Option<Card> {
        self.cards.remove(&card)
    }
}

#[cfg(test)]
mod tests {
    use super::CompositionBoard;
    use crate::model::archetype::ArchetypeDescriptor;
    use crate::model::card::Card;

    fn descriptor(name: &str) -> ArchetypeDescriptor {
        ArchetypeDescriptor::new("x", name, name, "d", "s", "card.png")
    }

    #[test]
    fn membership_queries_use_the_matching_predicate() {
        let mut board = CompositionBoard::new();
        let card = Card::spawn(descriptor("Villainy"));
        let id = card.id;
        board.insert(card);

        assert!(board.contains(id));
        assert!(board.contains_archetype(&descriptor("Villainy")));
        assert!(!board.contains_archetype(&descriptor("Wedding")));
        assert_eq!(board.card_matching(&descriptor("Villainy")).unwrap().id, id);
    }

    #[test]
    fn remove_returns_the_live_card() {
        let mut board = CompositionBoard::new();
        let card = Card::spawn(descriptor("Departure"));
        let id = card.id;
        board.insert(card);

        let removed = board.remove(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(board.is_empty());
        assert!(board.remove(id).is_none());
    }
}
