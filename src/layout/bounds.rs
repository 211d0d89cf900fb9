//! Bounds pass — axis-aligned containment rectangles per hierarchy cell.
//!
//! A node contributes to a cell's box only when every level of that cell
//! is assigned on the node: building boxes need `building_id`, floor boxes
//! need building + floor, zone boxes need all three. Unassigned equipment
//! is positioned but never boxed.

use std::collections::BTreeMap;

use crate::model::{BuildingId, FloorId, Node, Rect, ZoneId};

/// Bounding rectangles accumulated over assigned node positions.
/// BTreeMap keys give the emission walk a deterministic order.
#[derive(Debug, Default)]
pub(crate) struct CellBounds {
    pub per_building: BTreeMap<BuildingId, Rect>,
    pub per_floor: BTreeMap<(BuildingId, FloorId), Rect>,
    pub per_zone: BTreeMap<(BuildingId, FloorId, ZoneId), Rect>,
}

/// One linear pass over the laid-out nodes.
pub(crate) fn collect_bounds(nodes: &[Node]) -> CellBounds {
    let mut bounds = CellBounds::default();

    for node in nodes {
        let base = node.base();
        let pos = base.position;

        let Some(building) = &base.building_id else { continue };
        bounds
            .per_building
            .entry(building.clone())
            .or_insert(Rect::EMPTY)
            .expand_to(pos.x, pos.y);

        let Some(floor) = &base.floor_id else { continue };
        bounds
            .per_floor
            .entry((building.clone(), floor.clone()))
            .or_insert(Rect::EMPTY)
            .expand_to(pos.x, pos.y);

        let Some(zone) = &base.zone_id else { continue };
        bounds
            .per_zone
            .entry((building.clone(), floor.clone(), zone.clone()))
            .or_insert(Rect::EMPTY)
            .expand_to(pos.x, pos.y);
    }

    bounds
}
