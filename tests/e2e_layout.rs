//! End-to-end tests for the hierarchy-aware auto-layout engine:
//! column/row ordering, stacking, containment boxes, and idempotent
//! annotation regeneration.

use gasnet_core::{
    apply_auto_layout, Annotation, AnnotationKind, Building, Floor, GasType, LayoutConfig, Node,
    NodeBase, Position, Size, ValveState, Zone,
};

fn fitting(id: &str, building: &str, floor: &str, gas: GasType) -> Node {
    Node::fitting(
        NodeBase::new(id, format!("outlet {id}"))
            .with_building(building)
            .with_floor(floor)
            .with_gas(gas),
    )
}

/// Two-building site: East Wing with floors 2/1/-1, West Wing with floor 1.
fn site() -> (Vec<Node>, Vec<Building>, Vec<Floor>, Vec<Zone>) {
    let nodes = vec![
        fitting("e2-a", "b-east", "fl-e2", GasType::Oxygen),
        fitting("e2-b", "b-east", "fl-e2", GasType::Oxygen),
        fitting("e1-a", "b-east", "fl-e1", GasType::Oxygen),
        fitting("eb-a", "b-east", "fl-eb", GasType::Oxygen),
        fitting("w1-a", "b-west", "fl-w1", GasType::Vacuum),
        Node::fitting(NodeBase::new("loose", "Yard spare")),
    ];
    let buildings = vec![
        Building::new("b-east", "East Wing"),
        Building::new("b-west", "West Wing"),
    ];
    let floors = vec![
        Floor::new("fl-e2", "b-east", 2, "Level 2"),
        Floor::new("fl-e1", "b-east", 1, "Level 1"),
        Floor::new("fl-eb", "b-east", -1, "Basement"),
        Floor::new("fl-w1", "b-west", 1, "Level 1"),
    ];
    (nodes, buildings, floors, Vec::new())
}

fn run(
    nodes: &[Node],
    buildings: &[Building],
    floors: &[Floor],
    zones: &[Zone],
    previous: &[Annotation],
) -> gasnet_core::LayoutResult {
    apply_auto_layout(nodes, buildings, floors, zones, &LayoutConfig::default(), previous).unwrap()
}

fn position_of(result: &gasnet_core::LayoutResult, id: &str) -> Position {
    result
        .nodes
        .iter()
        .find(|n| n.id().as_str() == id)
        .unwrap()
        .position()
}

// ============================================================================
// 1. Floor ordering: highest floor topmost, basement bottommost
// ============================================================================

#[test]
fn test_floor_two_above_floor_one_above_basement() {
    let (nodes, buildings, floors, zones) = site();
    let result = run(&nodes, &buildings, &floors, &zones, &[]);

    let y2 = position_of(&result, "e2-a").y;
    let y1 = position_of(&result, "e1-a").y;
    let yb = position_of(&result, "eb-a").y;

    assert!(y2 < y1, "level 2 must be drawn above level 1");
    assert!(y1 < yb, "basement must be drawn below ground floors");
}

// ============================================================================
// 2. Building ordering: priority list, then alphabetical
// ============================================================================

#[test]
fn test_priority_list_overrides_alphabetical() {
    let (nodes, buildings, floors, zones) = site();

    let alphabetical = run(&nodes, &buildings, &floors, &zones, &[]);
    assert!(
        position_of(&alphabetical, "e1-a").x < position_of(&alphabetical, "w1-a").x,
        "East Wing sorts first alphabetically"
    );

    let config = LayoutConfig {
        building_priority: vec!["West Wing".into()],
        ..Default::default()
    };
    let prioritized =
        apply_auto_layout(&nodes, &buildings, &floors, &zones, &config, &[]).unwrap();
    assert!(
        position_of(&prioritized, "w1-a").x < position_of(&prioritized, "e1-a").x,
        "prioritized wing takes the first column"
    );
}

#[test]
fn test_unassigned_column_is_last() {
    let (nodes, buildings, floors, zones) = site();
    let result = run(&nodes, &buildings, &floors, &zones, &[]);
    let max_assigned_x = ["e2-a", "e1-a", "w1-a"]
        .iter()
        .map(|id| position_of(&result, id).x)
        .fold(f64::NEG_INFINITY, f64::max);
    assert!(position_of(&result, "loose").x > max_assigned_x);
}

// ============================================================================
// 3. Stacking: no collisions inside a bucket, deterministic by id
// ============================================================================

#[test]
fn test_same_bucket_nodes_stack_without_collision() {
    let (nodes, buildings, floors, zones) = site();
    let result = run(&nodes, &buildings, &floors, &zones, &[]);

    let a = position_of(&result, "e2-a");
    let b = position_of(&result, "e2-b");
    assert_eq!(a.x, b.x, "same bucket, same lane");
    assert_ne!(a.y, b.y, "monotonic stack offset");
}

#[test]
fn test_layout_is_deterministic() {
    let (nodes, buildings, floors, zones) = site();
    let first = run(&nodes, &buildings, &floors, &zones, &[]);
    let second = run(&nodes, &buildings, &floors, &zones, &[]);
    assert_eq!(first, second);
}

// ============================================================================
// 4. Containment annotations
// ============================================================================

#[test]
fn test_emits_header_label_and_floor_containers() {
    let (nodes, buildings, floors, zones) = site();
    let result = run(&nodes, &buildings, &floors, &zones, &[]);

    let headers: Vec<&Annotation> = result
        .annotations
        .iter()
        .filter(|a| a.kind == AnnotationKind::Building)
        .collect();
    assert_eq!(headers.len(), 2);
    assert!(headers.iter().any(|a| a.title == "East Wing"));

    let labels = result
        .annotations
        .iter()
        .filter(|a| a.kind == AnnotationKind::Label)
        .count();
    assert_eq!(labels, 2, "one name label per building");

    let floor_boxes: Vec<&Annotation> = result
        .annotations
        .iter()
        .filter(|a| a.kind == AnnotationKind::Floor)
        .collect();
    assert_eq!(floor_boxes.len(), 4);
    assert!(floor_boxes.iter().all(|a| a.metadata.auto_generated));
}

#[test]
fn test_zone_container_derived_from_node_triples() {
    let nodes = vec![
        Node::valve(
            NodeBase::new("v1", "ICU valve")
                .with_building("b1")
                .with_floor("f1")
                .with_zone("z-icu")
                .with_gas(GasType::Oxygen),
            ValveState::Open,
        ),
        fitting("f-out", "b1", "f1", GasType::Oxygen),
    ];
    let zones = vec![Zone::new("z-icu", "f1", "ICU")];
    let result = run(&nodes, &[], &[], &zones, &[]);

    let zone_box = result
        .annotations
        .iter()
        .find(|a| a.kind == AnnotationKind::Zone)
        .expect("zone container");
    assert_eq!(zone_box.title, "ICU");
    assert_eq!(zone_box.metadata.zone_id, Some("z-icu".into()));
}

#[test]
fn test_unassigned_nodes_produce_no_boxes() {
    let nodes = vec![
        Node::fitting(NodeBase::new("a", "Spare a")),
        Node::fitting(NodeBase::new("b", "Spare b")),
    ];
    let result = run(&nodes, &[], &[], &[], &[]);
    assert!(result.annotations.is_empty());
}

#[test]
fn test_header_sits_above_the_building_box() {
    let (nodes, buildings, floors, zones) = site();
    let config = LayoutConfig::default();
    let result = run(&nodes, &buildings, &floors, &zones, &[]);

    let header = result
        .annotations
        .iter()
        .find(|a| a.kind == AnnotationKind::Building && a.title == "East Wing")
        .unwrap();
    let top_node_y = position_of(&result, "e2-a").y;
    assert!(header.position.y < top_node_y - config.box_margin);
    assert_eq!(header.size.height, config.header_height);
}

// ============================================================================
// 5. Idempotent regeneration: cell ids survive a re-run
// ============================================================================

#[test]
fn test_rerun_reuses_every_annotation_id() {
    let (nodes, buildings, floors, zones) = site();
    let first = run(&nodes, &buildings, &floors, &zones, &[]);
    let second = run(&first.nodes, &buildings, &floors, &zones, &first.annotations);

    assert_eq!(first.annotations.len(), second.annotations.len());
    for (a, b) in first.annotations.iter().zip(&second.annotations) {
        assert_eq!(a.id, b.id, "unchanged cell must keep its id");
        assert_eq!(a.cell_key(), b.cell_key());
    }
}

#[test]
fn test_persisted_ids_survive_even_when_minted_ids_differ() {
    // Simulate the persistence collaborator having assigned its own ids.
    let (nodes, buildings, floors, zones) = site();
    let first = run(&nodes, &buildings, &floors, &zones, &[]);

    let persisted: Vec<Annotation> = first
        .annotations
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let mut a = a.clone();
            a.id = format!("db-{i}").as_str().into();
            a
        })
        .collect();

    let second = run(&nodes, &buildings, &floors, &zones, &persisted);
    for (i, annotation) in second.annotations.iter().enumerate() {
        assert_eq!(annotation.id, format!("db-{i}").as_str().into());
    }
}

#[test]
fn test_new_cell_gets_new_id_removed_cell_disappears() {
    let (mut nodes, buildings, mut floors, zones) = site();
    let first = run(&nodes, &buildings, &floors, &zones, &[]);

    // A new floor appears; the basement empties out.
    floors.push(Floor::new("fl-e3", "b-east", 3, "Level 3"));
    nodes.push(fitting("e3-a", "b-east", "fl-e3", GasType::Oxygen));
    nodes.retain(|n| n.id().as_str() != "eb-a");

    let second = run(&nodes, &buildings, &floors, &zones, &first.annotations);

    let first_floor_cells: Vec<_> = first
        .annotations
        .iter()
        .filter(|a| a.kind == AnnotationKind::Floor)
        .map(|a| a.cell_key().unwrap())
        .collect();

    let level3 = second
        .annotations
        .iter()
        .find(|a| a.title == "Level 3")
        .expect("new floor container");
    assert!(!first_floor_cells.contains(&level3.cell_key().unwrap()));

    assert!(
        !second.annotations.iter().any(|a| a.title == "Basement"),
        "emptied cell must not be re-emitted"
    );
}

// ============================================================================
// 6. Input is never mutated; only position changes on output
// ============================================================================

#[test]
fn test_input_nodes_untouched_and_only_position_changes() {
    let (nodes, buildings, floors, zones) = site();
    let before = nodes.clone();
    let result = run(&nodes, &buildings, &floors, &zones, &[]);

    assert_eq!(nodes, before, "layout must not mutate its input");
    for (input, output) in nodes.iter().zip(&result.nodes) {
        assert_eq!(input.id(), output.id());
        assert_eq!(input.kind(), output.kind());
        assert_eq!(input.base().building_id, output.base().building_id);
    }
}

// ============================================================================
// 7. Config guard
// ============================================================================

#[test]
fn test_nonpositive_spacing_is_rejected() {
    let (nodes, buildings, floors, zones) = site();
    let config = LayoutConfig { row_height: -10.0, ..Default::default() };
    assert!(apply_auto_layout(&nodes, &buildings, &floors, &zones, &config, &[]).is_err());
}

// ============================================================================
// 8. Downstream of layout: sizes reflect padding
// ============================================================================

#[test]
fn test_floor_box_padded_around_single_node() {
    let nodes = vec![fitting("only", "b1", "f1", GasType::Oxygen)];
    let config = LayoutConfig::default();
    let result = run(&nodes, &[], &[], &[], &[]);

    let floor_box = result
        .annotations
        .iter()
        .find(|a| a.kind == AnnotationKind::Floor)
        .unwrap();
    // A single point grows to margin × 2 in each dimension.
    assert_eq!(floor_box.size, Size::new(config.box_margin * 2.0, config.box_margin * 2.0));
}
