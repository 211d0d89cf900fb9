//! # Hierarchy-Aware Auto-Layout
//!
//! Derives readable, deterministic positions purely from building/floor/
//! gas metadata — constrained grid packing, not force-directed layout.
//!
//! Three linear passes over one snapshot:
//!
//! 1. **Bucket** — group nodes by `(building, floor, gas)` and fix the
//!    column/row/lane orderings (`buckets`).
//! 2. **Coordinate** — buildings map to columns, floors to rows (highest
//!    floor topmost, basements at the bottom), gas services to lanes
//!    within a row; nodes stack inside their bucket with a monotonic
//!    offset so none collide.
//! 3. **Bounds** — accumulate containment rectangles per hierarchy cell
//!    (`bounds`) and emit the building header/label, floor, and zone
//!    annotations, with previously-persisted ids merged back in
//!    (`reconcile`).
//!
//! Missing hierarchy data degrades to the unassigned bucket; nothing here
//! errors on data. The only hard failure is an invalid [`LayoutConfig`],
//! which is a caller bug.

pub mod reconcile;

mod buckets;
mod bounds;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    Annotation, AnnotationId, AnnotationKind, AnnotationMetadata, AnnotationScope, Building,
    BuildingId, Floor, FloorId, Node, Position, Rect, Size, Zone, ZoneId,
};
use crate::{Error, Result};

use buckets::{bucket_nodes, order_buildings, order_floors, order_lanes};
use bounds::collect_bounds;

pub use reconcile::reconcile_annotations;

// ============================================================================
// Configuration
// ============================================================================

/// Spacing and site-ordering knobs for the layout passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub origin_x: f64,
    pub origin_y: f64,
    /// Horizontal pitch between building columns.
    pub column_width: f64,
    /// Vertical pitch between floor rows.
    pub row_height: f64,
    /// Horizontal offset between gas lanes within a column.
    pub lane_gap: f64,
    /// Vertical offset between stacked nodes within one bucket.
    pub stack_gap: f64,
    /// Padding applied to every containment box.
    pub box_margin: f64,
    /// Height of the building header bar.
    pub header_height: f64,
    /// Site-specific wing ordering by building name. Buildings absent from
    /// this list sort alphabetically after the prioritized ones.
    pub building_priority: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            column_width: 480.0,
            row_height: 260.0,
            lane_gap: 90.0,
            stack_gap: 56.0,
            box_margin: 24.0,
            header_height: 36.0,
            building_priority: Vec::new(),
        }
    }
}

impl LayoutConfig {
    /// Reject degenerate spacing. A non-positive pitch would collapse
    /// distinct buckets onto one point, which is a programming bug in the
    /// caller, not a data-quality condition.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("columnWidth", self.column_width),
            ("rowHeight", self.row_height),
            ("laneGap", self.lane_gap),
            ("stackGap", self.stack_gap),
            ("headerHeight", self.header_height),
        ] {
            if value <= 0.0 || !value.is_finite() {
                return Err(Error::InvalidLayoutConfig(format!(
                    "{field} must be positive and finite, got {value}"
                )));
            }
        }
        if self.box_margin < 0.0 || !self.box_margin.is_finite() {
            return Err(Error::InvalidLayoutConfig(format!(
                "boxMargin must be non-negative, got {}",
                self.box_margin
            )));
        }
        Ok(())
    }
}

/// Output of one layout run: node copies with new positions, and the full
/// regenerated auto-annotation set.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    pub nodes: Vec<Node>,
    pub annotations: Vec<Annotation>,
}

// ============================================================================
// apply_auto_layout
// ============================================================================

/// Lay out the snapshot. Node order in the result matches the input.
///
/// `previous_auto_annotations` is the previously-persisted auto-generated
/// set; ids are reused for unchanged hierarchy cells so the persistence
/// collaborator updates in place instead of duplicating shapes.
pub fn apply_auto_layout(
    nodes: &[Node],
    buildings: &[Building],
    floors: &[Floor],
    zones: &[Zone],
    config: &LayoutConfig,
    previous_auto_annotations: &[Annotation],
) -> Result<LayoutResult> {
    config.validate()?;

    let buckets = bucket_nodes(nodes);
    let columns = order_buildings(&buckets, buildings, &config.building_priority);
    debug!(nodes = nodes.len(), columns = columns.len(), "layout bucket pass");

    // Coordinate pass.
    let mut positioned: Vec<Node> = nodes.to_vec();
    for (col, building) in columns.iter().enumerate() {
        let col_x = config.origin_x + col as f64 * config.column_width;
        let floors_present = &buckets[building];

        for (row, floor) in order_floors(floors_present, floors).iter().enumerate() {
            let row_y = config.origin_y + row as f64 * config.row_height;
            let lanes_present = &floors_present[floor];

            for (lane, gas) in order_lanes(lanes_present).iter().enumerate() {
                let lane_x = col_x + lane as f64 * config.lane_gap;
                for (slot, &index) in lanes_present[gas].iter().enumerate() {
                    let pos = Position::new(lane_x, row_y + slot as f64 * config.stack_gap);
                    positioned[index] = positioned[index].with_position(pos);
                }
            }
        }
    }

    // Bounds pass + annotation emission.
    let cell_bounds = collect_bounds(&positioned);
    debug!(
        buildings = cell_bounds.per_building.len(),
        floors = cell_bounds.per_floor.len(),
        zones = cell_bounds.per_zone.len(),
        "layout bounds pass"
    );

    let mut fresh: Vec<Annotation> = Vec::new();
    for building in columns.iter().flatten() {
        let Some(rect) = cell_bounds.per_building.get(building) else { continue };
        let boxed = rect.padded(config.box_margin);
        let name = building_name(building, buildings);

        fresh.push(building_header(building, &name, &boxed, config));
        fresh.push(building_label(building, &name, &boxed, config));

        for ((b, floor), rect) in &cell_bounds.per_floor {
            if b == building {
                fresh.push(floor_container(b, floor, rect, floors, config));
            }
        }
        for ((b, floor, zone), rect) in &cell_bounds.per_zone {
            if b == building {
                fresh.push(zone_container(b, floor, zone, rect, zones, config));
            }
        }
    }

    let annotations = reconcile_annotations(fresh, previous_auto_annotations);
    Ok(LayoutResult { nodes: positioned, annotations })
}

// ============================================================================
// Annotation emission
// ============================================================================

fn building_name(id: &BuildingId, buildings: &[Building]) -> String {
    buildings
        .iter()
        .find(|b| b.id == *id)
        .map_or_else(|| id.to_string(), |b| b.name.clone())
}

fn auto_metadata(
    scope: AnnotationScope,
    building: Option<&BuildingId>,
    floor: Option<&FloorId>,
    zone: Option<&ZoneId>,
) -> AnnotationMetadata {
    AnnotationMetadata {
        auto_generated: true,
        scope: Some(scope),
        building_id: building.cloned(),
        floor_id: floor.cloned(),
        zone_id: zone.cloned(),
    }
}

fn building_header(
    id: &BuildingId,
    name: &str,
    boxed: &Rect,
    config: &LayoutConfig,
) -> Annotation {
    Annotation {
        id: AnnotationId::from(format!("auto:building:{id}")),
        kind: AnnotationKind::Building,
        title: name.to_owned(),
        position: Position::new(boxed.min_x, boxed.min_y - config.header_height),
        size: Size::new(boxed.width(), config.header_height),
        metadata: auto_metadata(AnnotationScope::Building, Some(id), None, None),
    }
}

fn building_label(
    id: &BuildingId,
    name: &str,
    boxed: &Rect,
    config: &LayoutConfig,
) -> Annotation {
    Annotation {
        id: AnnotationId::from(format!("auto:building-label:{id}")),
        kind: AnnotationKind::Label,
        title: name.to_owned(),
        position: Position::new(boxed.min_x + 8.0, boxed.min_y - config.header_height + 6.0),
        size: Size::new(
            (boxed.width() - 16.0).max(0.0),
            (config.header_height - 12.0).max(0.0),
        ),
        metadata: auto_metadata(AnnotationScope::BuildingLabel, Some(id), None, None),
    }
}

fn floor_container(
    building: &BuildingId,
    floor: &FloorId,
    rect: &Rect,
    floors: &[Floor],
    config: &LayoutConfig,
) -> Annotation {
    let boxed = rect.padded(config.box_margin);
    let title = floors
        .iter()
        .find(|f| f.id == *floor)
        .map_or_else(|| floor.to_string(), |f| f.name.clone());
    Annotation {
        id: AnnotationId::from(format!("auto:floor:{building}:{floor}")),
        kind: AnnotationKind::Floor,
        title,
        position: boxed.origin(),
        size: boxed.size(),
        metadata: auto_metadata(AnnotationScope::Floor, Some(building), Some(floor), None),
    }
}

fn zone_container(
    building: &BuildingId,
    floor: &FloorId,
    zone: &ZoneId,
    rect: &Rect,
    zones: &[Zone],
    config: &LayoutConfig,
) -> Annotation {
    let boxed = rect.padded(config.box_margin);
    let title = zones
        .iter()
        .find(|z| z.id == *zone)
        .map_or_else(|| zone.to_string(), |z| z.name.clone());
    Annotation {
        id: AnnotationId::from(format!("auto:zone:{building}:{floor}:{zone}")),
        kind: AnnotationKind::Zone,
        title,
        position: boxed.origin(),
        size: boxed.size(),
        metadata: auto_metadata(
            AnnotationScope::Zone,
            Some(building),
            Some(floor),
            Some(zone),
        ),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GasType, NodeBase};

    #[test]
    fn test_default_config_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_spacing_rejected() {
        let config = LayoutConfig { stack_gap: 0.0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidLayoutConfig(_))
        ));
    }

    #[test]
    fn test_nodes_in_one_bucket_never_collide() {
        let nodes: Vec<Node> = (0..5)
            .map(|i| {
                Node::fitting(
                    NodeBase::new(format!("f{i}"), "outlet")
                        .with_building("b1")
                        .with_floor("fl1")
                        .with_gas(GasType::Oxygen),
                )
            })
            .collect();
        let result = apply_auto_layout(
            &nodes,
            &[],
            &[],
            &[],
            &LayoutConfig::default(),
            &[],
        )
        .unwrap();

        let mut ys: Vec<f64> = result.nodes.iter().map(|n| n.position().y).collect();
        ys.sort_by(f64::total_cmp);
        ys.dedup();
        assert_eq!(ys.len(), 5);
    }

    #[test]
    fn test_buildings_occupy_distinct_columns() {
        let nodes = vec![
            Node::fitting(NodeBase::new("a", "x").with_building("b1")),
            Node::fitting(NodeBase::new("b", "x").with_building("b2")),
        ];
        let result =
            apply_auto_layout(&nodes, &[], &[], &[], &LayoutConfig::default(), &[]).unwrap();
        let xa = result.nodes[0].position().x;
        let xb = result.nodes[1].position().x;
        assert_ne!(xa, xb);
        assert_eq!((xa - xb).abs(), LayoutConfig::default().column_width);
    }

    #[test]
    fn test_unassigned_nodes_positioned_but_unboxed() {
        let nodes = vec![Node::fitting(NodeBase::new("loose", "spare"))];
        let result =
            apply_auto_layout(&nodes, &[], &[], &[], &LayoutConfig::default(), &[]).unwrap();
        assert!(result.annotations.is_empty());
        // Still receives a computed position in the unassigned column.
        assert_eq!(result.nodes[0].position(), Position::new(0.0, 0.0));
    }
}
