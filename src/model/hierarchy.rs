//! Building → Floor → Zone containment hierarchy.
//!
//! Nodes reference these independently (not strictly nested): a node may
//! carry a `building_id` with no `floor_id`.

use serde::{Deserialize, Serialize};

use super::{BuildingId, FloorId, ZoneId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
}

impl Building {
    pub fn new(id: impl Into<BuildingId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into() }
    }
}

/// Floor within a building. Negative `floor_number` means basement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    pub building_id: BuildingId,
    pub floor_number: i32,
    pub name: String,
}

impl Floor {
    pub fn new(
        id: impl Into<FloorId>,
        building_id: impl Into<BuildingId>,
        floor_number: i32,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            building_id: building_id.into(),
            floor_number,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub floor_id: FloorId,
    pub name: String,
}

impl Zone {
    pub fn new(id: impl Into<ZoneId>, floor_id: impl Into<FloorId>, name: impl Into<String>) -> Self {
        Self { id: id.into(), floor_id: floor_id.into(), name: name.into() }
    }
}
