//! Core slot/card placement logic for the story-map card board.
//! This crate is the single source of truth for binding invariants.

pub mod board;
pub mod catalogue;
pub mod logging;
pub mod model;
pub mod placement;
pub mod snapshot;

pub use board::{CatalogueBoard, CompositionBoard, Slot, SlotAnchor};
pub use catalogue::{Catalogue, CatalogueError, CatalogueResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::archetype::{ArchetypeDescriptor, ArchetypeValidationError};
pub use model::card::{Card, CardId};
pub use placement::engine::PlacementEngine;
pub use placement::{
    DragPayload, DropTarget, IntegrityViolation, NodeHandle, NullRenderSink, RenderSink,
};
pub use snapshot::store::{load_snapshot, parse_snapshot, save_snapshot};
pub use snapshot::{
    BoardSnapshot, CardSnapshot, SlotSnapshot, SnapshotError, SnapshotResult,
    SNAPSHOT_FORMAT_VERSION,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
