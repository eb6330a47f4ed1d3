use storymap_core::{
    ArchetypeDescriptor, Card, CardId, Catalogue, DragPayload, DropTarget, NodeHandle,
    NullRenderSink, PlacementEngine, RenderSink, SlotAnchor,
};

fn descriptor(name: &str) -> ArchetypeDescriptor {
    ArchetypeDescriptor::new("x", name, name, "description", "short", "card.png")
}

fn three_catalogue() -> Catalogue {
    Catalogue::from_functions(vec![
        descriptor("Villainy"),
        descriptor("Departure"),
        descriptor("Return"),
    ])
    .unwrap()
}

#[derive(Default)]
struct RecordingSink {
    commands: Vec<String>,
}

impl RenderSink for RecordingSink {
    fn position_card_at(&mut self, card: CardId, anchor: SlotAnchor) {
        self.commands.push(format!("position {card} slot={}", anchor.0));
    }

    fn reparent_card(&mut self, card: CardId, board: DropTarget) {
        self.commands.push(format!("reparent {card} {board:?}"));
    }
}

fn seed_id<R: RenderSink>(engine: &PlacementEngine<R>, index: usize) -> CardId {
    engine.catalogue_board().all_slots()[index].seed().id
}

#[test]
fn dropping_a_seed_binds_its_slot_and_notifies_the_renderer() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, RecordingSink::default());

    let seed = seed_id(&engine, 1);
    let accepted = engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard);
    assert!(accepted);

    let slot = &engine.catalogue_board().all_slots()[1];
    assert!(slot.is_occupied());
    assert_eq!(engine.composition_board().len(), 1);

    let placed = engine
        .composition_board()
        .card_matching(&descriptor("Departure"))
        .unwrap();
    // The seed itself stays on the catalogue board; a duplicate was placed.
    assert_ne!(placed.id, seed);
    assert_eq!(slot.occupant(), Some(placed.id));

    let commands = &engine.renderer().commands;
    assert!(commands
        .iter()
        .any(|command| command == &format!("reparent {} CompositionBoard", placed.id)));
    assert!(commands
        .iter()
        .any(|command| command == &format!("position {} slot=1", placed.id)));
}

#[test]
fn a_second_card_of_the_same_function_is_rejected() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, RecordingSink::default());

    let seed = seed_id(&engine, 1);
    assert!(engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard));

    // Dragging the seed again would spawn a second Departure card.
    let rejected = engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard);
    assert!(!rejected);
    assert_eq!(engine.composition_board().len(), 1);
}

#[test]
fn redropping_a_card_onto_its_own_slot_is_an_accepted_no_op() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, RecordingSink::default());

    let seed = seed_id(&engine, 0);
    assert!(engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard));
    let placed = engine
        .composition_board()
        .card_matching(&descriptor("Villainy"))
        .unwrap()
        .id;

    let accepted =
        engine.on_drop_attempt(&DragPayload::Card(placed), DropTarget::CompositionBoard);
    assert!(accepted);
    assert_eq!(engine.composition_board().len(), 1);
    assert_eq!(
        engine.catalogue_board().all_slots()[0].occupant(),
        Some(placed)
    );
}

#[test]
fn non_card_payloads_are_rejected() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, NullRenderSink);

    let rejected = engine.on_drop_attempt(
        &DragPayload::Node(NodeHandle(7)),
        DropTarget::CompositionBoard,
    );
    assert!(!rejected);
    assert!(engine.composition_board().is_empty());
}

#[test]
fn a_card_with_no_catalogue_slot_is_rejected() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, NullRenderSink);

    let foreign = engine.adopt_card(Card::spawn(descriptor("Wedding")));
    let rejected =
        engine.on_drop_attempt(&DragPayload::Card(foreign), DropTarget::CompositionBoard);
    assert!(!rejected);
    assert!(engine.composition_board().is_empty());
    // The card stays alive in floating state.
    assert_eq!(engine.floating_cards().count(), 1);
}

#[test]
fn releasing_a_bound_card_in_empty_space_unbinds_it() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, RecordingSink::default());

    let seed = seed_id(&engine, 1);
    assert!(engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard));
    let placed = engine
        .composition_board()
        .card_matching(&descriptor("Departure"))
        .unwrap()
        .id;

    engine.on_drag_released(placed, None);

    assert!(!engine.catalogue_board().all_slots()[1].is_occupied());
    assert!(engine.composition_board().is_empty());
    let floating: Vec<CardId> = engine.floating_cards().map(|card| card.id).collect();
    assert_eq!(floating, [placed]);
}

#[test]
fn a_floating_card_can_be_dropped_back_on() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, RecordingSink::default());

    let seed = seed_id(&engine, 1);
    assert!(engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard));
    let placed = engine
        .composition_board()
        .card_matching(&descriptor("Departure"))
        .unwrap()
        .id;
    engine.on_drag_released(placed, None);

    let accepted =
        engine.on_drop_attempt(&DragPayload::Card(placed), DropTarget::CompositionBoard);
    assert!(accepted);
    // The same instance is rebound; no duplicate was spawned.
    assert_eq!(engine.composition_board().len(), 1);
    assert!(engine.composition_board().contains(placed));
    assert_eq!(engine.floating_cards().count(), 0);
    assert_eq!(
        engine.catalogue_board().all_slots()[1].occupant(),
        Some(placed)
    );
}

#[test]
fn a_release_accepted_by_a_board_leaves_the_binding_alone() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, NullRenderSink);

    let seed = seed_id(&engine, 2);
    assert!(engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard));
    let placed = engine
        .composition_board()
        .card_matching(&descriptor("Return"))
        .unwrap()
        .id;

    engine.on_drag_released(placed, Some(DropTarget::CompositionBoard));
    assert!(engine.catalogue_board().all_slots()[2].is_occupied());
    assert_eq!(engine.composition_board().len(), 1);
}

#[test]
fn dropping_a_card_back_onto_the_catalogue_returns_it_to_storage() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, RecordingSink::default());

    let seed = seed_id(&engine, 0);
    assert!(engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard));
    let placed = engine
        .composition_board()
        .card_matching(&descriptor("Villainy"))
        .unwrap()
        .id;

    let accepted = engine.on_drop_attempt(&DragPayload::Card(placed), DropTarget::CatalogueBoard);
    assert!(accepted);
    assert!(engine.composition_board().is_empty());
    assert!(!engine.catalogue_board().all_slots()[0].is_occupied());
    assert_eq!(engine.floating_cards().count(), 0);
    // The seed still renders the slot's baseline face.
    assert_eq!(engine.catalogue_board().all_slots()[0].seed().id, seed);
}

#[test]
fn seeds_themselves_cannot_be_dropped_onto_the_catalogue() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, NullRenderSink);

    let seed = seed_id(&engine, 0);
    assert!(!engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CatalogueBoard));
}

#[test]
fn returning_is_rejected_while_a_different_card_holds_the_slot() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, NullRenderSink);

    let seed = seed_id(&engine, 0);
    assert!(engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard));

    let rival = engine.adopt_card(Card::spawn(descriptor("Villainy")));
    let rejected = engine.on_drop_attempt(&DragPayload::Card(rival), DropTarget::CatalogueBoard);
    assert!(!rejected);
    assert_eq!(engine.composition_board().len(), 1);
    assert_eq!(engine.floating_cards().count(), 1);
}

#[test]
fn duplicate_rule_holds_across_arbitrary_drop_and_release_sequences() {
    let catalogue = three_catalogue();
    let mut engine = PlacementEngine::new(&catalogue, NullRenderSink);

    for _ in 0..3 {
        let seed = seed_id(&engine, 1);
        engine.on_drop_attempt(&DragPayload::Card(seed), DropTarget::CompositionBoard);
        let placed = engine
            .composition_board()
            .card_matching(&descriptor("Departure"))
            .unwrap()
            .id;
        engine.on_drop_attempt(&DragPayload::Card(placed), DropTarget::CompositionBoard);
        engine.on_drag_released(placed, None);
        engine.on_drop_attempt(&DragPayload::Card(placed), DropTarget::CompositionBoard);

        let departures = engine
            .composition_board()
            .cards()
            .filter(|card| card.archetype().matches(&descriptor("Departure")))
            .count();
        assert_eq!(departures, 1);
        engine.verify_integrity().unwrap();

        let placed = engine
            .composition_board()
            .card_matching(&descriptor("Departure"))
            .unwrap()
            .id;
        engine.on_drop_attempt(&DragPayload::Card(placed), DropTarget::CatalogueBoard);
        assert!(engine.composition_board().is_empty());
    }
}
