//! The placement engine: drop/release transitions and snapshot capture.
//!
//! # Responsibility
//! - Decide accept/reject for every drop attempt, in rule order.
//! - Keep slot occupancy and composition membership consistent across both
//!   boards.
//! - Capture and restore the whole placement state as a detached record.
//!
//! # Invariants
//! - All transitions run synchronously to completion; the engine holds
//!   `&mut self` for every mutation, so no interleaving is representable.
//! - A rejected drop mutates nothing and returns `false`.
//! - Restore is all-or-nothing: validation completes before any live state
//!   is replaced.

use crate::board::catalogue_board::{CatalogueBoard, SlotAnchor};
use crate::board::composition_board::CompositionBoard;
use crate::board::slot::Slot;
use crate::catalogue::Catalogue;
use crate::model::card::{Card, CardId};
use crate::placement::{DragPayload, DropTarget, IntegrityViolation, RenderSink};
use crate::snapshot::{
    BoardSnapshot, CardSnapshot, SlotSnapshot, SnapshotError, SnapshotResult,
    SNAPSHOT_FORMAT_VERSION,
};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};

/// The slot/card binding state machine.
///
/// Owns the catalogue board, the composition board and the set of floating
/// cards (detached mid-drag, bound to neither board). Generic over the
/// rendering host's command sink.
pub struct PlacementEngine<R: RenderSink> {
    catalogue_board: CatalogueBoard,
    composition_board: CompositionBoard,
    floating: BTreeMap<CardId, Card>,
    observed: BTreeSet<CardId>,
    renderer: R,
}

impl<R: RenderSink> PlacementEngine<R> {
    /// Builds an engine with empty boards for the given catalogue.
    pub fn new(catalogue: &Catalogue, renderer: R) -> Self {
        Self {
            catalogue_board: CatalogueBoard::new(catalogue),
            composition_board: CompositionBoard::new(),
            floating: BTreeMap::new(),
            observed: BTreeSet::new(),
            renderer,
        }
    }

    pub fn catalogue_board(&self) -> &CatalogueBoard {
        &self.catalogue_board
    }

    pub fn composition_board(&self) -> &CompositionBoard {
        &self.composition_board
    }

    /// Cards currently bound to neither board.
    pub fn floating_cards(&self) -> impl Iterator<Item = &Card> {
        self.floating.values()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Hands a host-created card to the engine in floating state.
    ///
    /// Ordinary cards enter play by dragging a catalogue seed; this is the
    /// entry point for cards created outside the engine (import paths,
    /// defensive-rule tests).
    pub fn adopt_card(&mut self, card: Card) -> CardId {
        let id = card.id;
        self.floating.insert(id, card);
        id
    }

    /// Decides one drop attempt. Returns whether the drop was accepted.
    ///
    /// Rejection is silent: no state change, no panic; the host renders its
    /// own feedback (snap-back) on a `false` return.
    pub fn on_drop_attempt(&mut self, payload: &DragPayload, target: DropTarget) -> bool {
        let card_id = match payload {
            DragPayload::Card(id) => *id,
            DragPayload::Node(handle) => {
                debug!(
                    "event=drop_attempt module=placement status=rejected reason=not_a_card node={}",
                    handle.0
                );
                return false;
            }
        };

        match target {
            DropTarget::CompositionBoard => self.drop_on_composition(card_id),
            DropTarget::CatalogueBoard => self.drop_on_catalogue(card_id),
        }
    }

    /// Settles one drag-release cycle.
    ///
    /// A release accepted by a board was already applied by
    /// [`on_drop_attempt`](Self::on_drop_attempt); a release accepted by no
    /// board unbinds the card's slot and leaves the card floating, alive and
    /// ready to be picked up again.
    pub fn on_drag_released(&mut self, card: CardId, accepted_by: Option<DropTarget>) {
        if let Some(target) = accepted_by {
            debug!(
                "event=drag_released module=placement status=settled card={card} target={}",
                target.as_str()
            );
            return;
        }

        if !self.observed.remove(&card) {
            return;
        }

        if let Some(live) = self.composition_board.remove(card) {
            let archetype = live.archetype().clone();
            if let Some(slot) = self.catalogue_board.find_slot_mut(&archetype) {
                if slot.occupant() == Some(card) {
                    slot.clear();
                }
            }
            self.floating.insert(card, live);
            info!(
                "event=card_unbound module=placement status=ok card={card} archetype={}",
                archetype.canonical_name
            );
        }
    }

    fn drop_on_composition(&mut self, card_id: CardId) -> bool {
        let archetype = match self.lookup_card(card_id) {
            Some(card) => card.archetype().clone(),
            None => {
                debug!(
                    "event=drop_attempt module=placement status=rejected reason=unknown_card card={card_id}"
                );
                return false;
            }
        };

        // The duplicate check excludes the incoming card's own binding, so
        // re-dropping a card onto the slot it already occupies is an
        // accepted no-op rather than a self-rejection.
        if let Some(existing_id) = self
            .composition_board
            .card_matching(&archetype)
            .map(|card| card.id)
        {
            if existing_id == card_id {
                if let Some(anchor) = self.catalogue_board.anchor_of(&archetype) {
                    self.renderer.position_card_at(card_id, anchor);
                }
                debug!(
                    "event=drop_attempt module=placement status=accepted reason=redrop card={card_id}"
                );
                return true;
            }
            debug!(
                "event=drop_attempt module=placement status=rejected reason=duplicate_function archetype={}",
                archetype.canonical_name
            );
            return false;
        }

        let slot_index = match self.catalogue_board.slot_index(&archetype) {
            Some(index) => index,
            None => {
                debug!(
                    "event=drop_attempt module=placement status=rejected reason=no_slot archetype={}",
                    archetype.canonical_name
                );
                return false;
            }
        };

        let placed = match self.floating.remove(&card_id) {
            Some(card) => card,
            None => match self.catalogue_board.seed_for(card_id) {
                // First drag-out of this function: the seed stays put and a
                // fresh duplicate becomes the live card.
                Some(seed) => seed.duplicate(),
                None => {
                    debug!(
                        "event=drop_attempt module=placement status=rejected reason=unknown_card card={card_id}"
                    );
                    return false;
                }
            },
        };

        self.bind(placed, slot_index);
        true
    }

    fn drop_on_catalogue(&mut self, card_id: CardId) -> bool {
        // Seeds never move; a seed cannot be dropped anywhere, including
        // back onto its own board.
        if self.catalogue_board.seed_for(card_id).is_some() {
            debug!(
                "event=drop_attempt module=placement status=rejected reason=seed_card card={card_id}"
            );
            return false;
        }

        let archetype = match self
            .composition_board
            .get(card_id)
            .or_else(|| self.floating.get(&card_id))
        {
            Some(card) => card.archetype().clone(),
            None => {
                debug!(
                    "event=drop_attempt module=placement status=rejected reason=unknown_card card={card_id}"
                );
                return false;
            }
        };

        let slot_index = match self.catalogue_board.slot_index(&archetype) {
            Some(index) => index,
            None => {
                debug!(
                    "event=drop_attempt module=placement status=rejected reason=no_slot archetype={}",
                    archetype.canonical_name
                );
                return false;
            }
        };

        if let Some(occupant) = self.catalogue_board.all_slots()[slot_index].occupant() {
            if occupant != card_id {
                debug!(
                    "event=drop_attempt module=placement status=rejected reason=duplicate_function archetype={}",
                    archetype.canonical_name
                );
                return false;
            }
        }

        // Return to storage: unbind and absorb the card; the seed remains
        // as the slot's visible face.
        self.composition_board.remove(card_id);
        self.floating.remove(&card_id);
        if let Some(slot) = self.catalogue_board.slot_mut(slot_index) {
            if slot.occupant() == Some(card_id) {
                slot.clear();
            }
        }
        self.observed.remove(&card_id);
        self.renderer.reparent_card(card_id, DropTarget::CatalogueBoard);
        info!(
            "event=card_returned module=placement status=ok card={card_id} archetype={}",
            archetype.canonical_name
        );
        true
    }

    /// Binds a card to a slot and places it on the composition board.
    ///
    /// The single binding path: normal accepted drops and restore both go
    /// through here, so post-restore state obeys the same invariants as
    /// runtime state.
    fn bind(&mut self, mut card: Card, slot_index: usize) {
        card.unhighlight();
        let card_id = card.id;
        if let Some(slot) = self.catalogue_board.slot_mut(slot_index) {
            slot.bind(card_id);
        }
        self.composition_board.insert(card);
        self.observed.insert(card_id);
        self.renderer
            .reparent_card(card_id, DropTarget::CompositionBoard);
        self.renderer
            .position_card_at(card_id, SlotAnchor(slot_index));
        info!("event=card_bound module=placement status=ok slot={slot_index} card={card_id}");
    }

    fn lookup_card(&self, card_id: CardId) -> Option<&Card> {
        self.composition_board
            .get(card_id)
            .or_else(|| self.floating.get(&card_id))
            .or_else(|| self.catalogue_board.seed_for(card_id))
    }

    /// Checks slot/occupant agreement and the cross-board invariant.
    ///
    /// A violation indicates a programming error in engine usage; correct
    /// use of the drop/release API cannot produce one.
    pub fn verify_integrity(&self) -> Result<(), IntegrityViolation> {
        for slot in self.catalogue_board.all_slots() {
            if let Some(occupant) = slot.occupant() {
                match self.composition_board.get(occupant) {
                    Some(card) if card.archetype().matches(slot.archetype()) => {}
                    Some(card) => {
                        return Err(IntegrityViolation::MismatchedOccupant {
                            slot: slot.archetype().canonical_name.clone(),
                            card: card.archetype().canonical_name.clone(),
                        });
                    }
                    None => {
                        return Err(IntegrityViolation::DanglingOccupant {
                            slot: slot.archetype().canonical_name.clone(),
                            card: occupant,
                        });
                    }
                }
            }
        }

        for card in self.composition_board.cards() {
            let bound = self
                .catalogue_board
                .find_slot(card.archetype())
                .is_some_and(|slot| slot.occupant() == Some(card.id));
            if !bound {
                return Err(IntegrityViolation::UnboundCompositionCard {
                    card: card.id,
                    archetype: card.archetype().canonical_name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Freezes the full placement state into a detached record.
    ///
    /// # Errors
    /// Returns `SnapshotError::Integrity` when the cross-board invariant is
    /// found broken.
    pub fn capture(&self) -> SnapshotResult<BoardSnapshot> {
        self.verify_integrity().map_err(SnapshotError::Integrity)?;

        let slots = self
            .catalogue_board
            .all_slots()
            .iter()
            .map(|slot| SlotSnapshot {
                function: slot.archetype().detached(),
                card: slot
                    .occupant()
                    .and_then(|id| self.composition_board.get(id))
                    .map(|card| CardSnapshot {
                        function: card.archetype().detached(),
                    }),
            })
            .collect();

        Ok(BoardSnapshot {
            version: SNAPSHOT_FORMAT_VERSION,
            slots,
        })
    }

    /// Replaces the whole slot/card population from a record.
    ///
    /// All-or-nothing: the record is fully validated before any live state
    /// is touched, so a malformed record leaves the prior population intact.
    /// Occupied entries are rebound through the same path as a normal
    /// accepted drop.
    ///
    /// # Errors
    /// Returns `SnapshotError::Malformed` on a structurally invalid record.
    pub fn restore(&mut self, record: &BoardSnapshot) -> SnapshotResult<()> {
        record.validate()?;

        // Validation is complete; nothing below can fail.
        let slots = record
            .slots
            .iter()
            .map(|entry| Slot::new(entry.function.detached()))
            .collect();
        self.catalogue_board = CatalogueBoard::from_slots(slots);
        self.composition_board = CompositionBoard::new();
        self.floating.clear();
        self.observed.clear();

        for (index, entry) in record.slots.iter().enumerate() {
            if let Some(card_record) = &entry.card {
                let card = Card::spawn(card_record.function.detached());
                self.bind(card, index);
            }
        }

        info!(
            "event=board_restored module=placement status=ok slots={} occupied={}",
            record.slots.len(),
            record.occupied_count()
        );
        Ok(())
    }
}
