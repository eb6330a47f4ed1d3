//! Drop/release event intake and the slot binding state machine.
//!
//! # Responsibility
//! - Define the typed boundary shared with the rendering/gesture host.
//! - Decide accept/reject for every drop and keep both boards consistent.
//!
//! # Invariants
//! - Rejection is silent: a `false` return, no state change, no panic.
//! - A card on the composition board always has a matching occupied slot on
//!   the catalogue board, and vice versa.

use crate::board::catalogue_board::SlotAnchor;
use crate::model::card::CardId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod engine;

/// A board a drag gesture can resolve onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    CatalogueBoard,
    CompositionBoard,
}

impl DropTarget {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::CatalogueBoard => "catalogue",
            Self::CompositionBoard => "composition",
        }
    }
}

/// Opaque handle for a scene node that is not a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub u64);

/// Typed payload of a drag gesture.
///
/// The host decides at the gesture boundary whether the dragged node is a
/// card; the engine never probes untyped node attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    Card(CardId),
    Node(NodeHandle),
}

/// Placement commands the engine emits to the rendering host.
///
/// All commands are fire-and-forget; the core consumes no return value.
pub trait RenderSink {
    /// Position a card's visual anchor at a slot's anchor.
    fn position_card_at(&mut self, card: CardId, anchor: SlotAnchor);

    /// Move a card's node under the given board's subtree.
    fn reparent_card(&mut self, card: CardId, board: DropTarget);
}

/// Render sink that ignores every command (headless hosts, tests).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderSink;

impl RenderSink for NullRenderSink {
    fn position_card_at(&mut self, _card: CardId, _anchor: SlotAnchor) {}

    fn reparent_card(&mut self, _card: CardId, _board: DropTarget) {}
}

/// Defensive cross-board consistency failures.
///
/// These indicate a programming error in engine usage, not a user-recoverable
/// condition; they are surfaced at capture time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// A slot's occupant carries a different archetype than the slot.
    MismatchedOccupant { slot: String, card: String },
    /// A slot refers to a card that is not on the composition board.
    DanglingOccupant { slot: String, card: CardId },
    /// A composition-board card has no matching occupied slot.
    UnboundCompositionCard { card: CardId, archetype: String },
}

impl Display for IntegrityViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MismatchedOccupant { slot, card } => write!(
                f,
                "slot `{slot}` is bound to a card of archetype `{card}`"
            ),
            Self::DanglingOccupant { slot, card } => write!(
                f,
                "slot `{slot}` refers to card {card} which is not on the composition board"
            ),
            Self::UnboundCompositionCard { card, archetype } => write!(
                f,
                "composition card {card} of archetype `{archetype}` has no bound slot"
            ),
        }
    }
}

impl Error for IntegrityViolation {}
