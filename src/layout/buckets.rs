//! Bucket pass — group nodes by `(building, floor, gas)` and derive the
//! deterministic column/row/lane orderings.

use hashbrown::HashMap;

use crate::model::{Building, BuildingId, Floor, FloorId, GasType, Node};

/// Nodes grouped by hierarchy cell. `None` at any level is the
/// "unassigned" bucket — absent hierarchy data degrades, never errors.
///
/// Values are indices into the caller's node slice.
pub(crate) type BucketMap =
    HashMap<Option<BuildingId>, HashMap<Option<FloorId>, HashMap<Option<GasType>, Vec<usize>>>>;

/// Single O(N) grouping pass. Node order within a bucket is normalized to
/// id order so stacking is reproducible across calls.
pub(crate) fn bucket_nodes(nodes: &[Node]) -> BucketMap {
    let mut buckets: BucketMap = HashMap::new();
    for (i, node) in nodes.iter().enumerate() {
        let base = node.base();
        buckets
            .entry(base.building_id.clone())
            .or_default()
            .entry(base.floor_id.clone())
            .or_default()
            .entry(base.gas_type)
            .or_default()
            .push(i);
    }
    for floors in buckets.values_mut() {
        for lanes in floors.values_mut() {
            for members in lanes.values_mut() {
                members.sort_by(|&a, &b| nodes[a].id().cmp(nodes[b].id()));
            }
        }
    }
    buckets
}

/// Building column order: priority-list position first (site-specific wing
/// ordering), then alphabetically by name, ties broken by id. Buildings
/// without a record fall back to their id as the name. The unassigned
/// pseudo-column always goes last.
pub(crate) fn order_buildings(
    buckets: &BucketMap,
    buildings: &[Building],
    priority: &[String],
) -> Vec<Option<BuildingId>> {
    let names: HashMap<&BuildingId, &str> =
        buildings.iter().map(|b| (&b.id, b.name.as_str())).collect();

    let mut assigned: Vec<&BuildingId> = buckets.keys().flatten().collect();
    assigned.sort_by_cached_key(|id| {
        let name = names.get(id).copied().unwrap_or(id.as_str());
        let rank = priority
            .iter()
            .position(|p| p == name)
            .unwrap_or(priority.len());
        (rank, name.to_owned(), (*id).clone())
    });

    let mut columns: Vec<Option<BuildingId>> = assigned.into_iter().cloned().map(Some).collect();
    if buckets.contains_key(&None) {
        columns.push(None);
    }
    columns
}

/// Floor row order within one building column: descending `floor_number`
/// (topmost row = highest floor, basements at the bottom), then floors
/// whose id has no record (alphabetical), then the unassigned row.
pub(crate) fn order_floors(
    floors_present: &HashMap<Option<FloorId>, HashMap<Option<GasType>, Vec<usize>>>,
    floors: &[Floor],
) -> Vec<Option<FloorId>> {
    let numbers: HashMap<&FloorId, i32> =
        floors.iter().map(|f| (&f.id, f.floor_number)).collect();

    let mut rows: Vec<Option<FloorId>> = floors_present.keys().cloned().collect();
    rows.sort_by_cached_key(|row| match row {
        Some(id) => match numbers.get(id) {
            Some(n) => (0u8, -(*n as i64), id.clone()),
            None => (1, 0, id.clone()),
        },
        None => (2, 0, FloorId::from("")),
    });
    rows
}

/// Gas lane order within one floor row: service order from
/// [`GasType::ALL`], untyped lane last.
pub(crate) fn order_lanes(
    lanes_present: &HashMap<Option<GasType>, Vec<usize>>,
) -> Vec<Option<GasType>> {
    let mut lanes: Vec<Option<GasType>> = lanes_present.keys().copied().collect();
    lanes.sort_by_key(|lane| (lane.is_none(), *lane));
    lanes
}
