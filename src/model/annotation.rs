//! Annotations — non-functional shapes and labels overlaid on the diagram.
//!
//! Auto-generated annotations are derived artifacts of the layout engine,
//! identified by their hierarchy cell, never by content. Manual annotations
//! are independent and never touched by regeneration.

use serde::{Deserialize, Serialize};

use super::{AnnotationId, BuildingId, FloorId, Position, Size, ZoneId};

/// Visual kind of the annotation shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Building,
    Floor,
    Zone,
    Service,
    Label,
}

/// Identity scope of an auto-generated annotation.
///
/// A building produces two derived shapes (the header bar and the name
/// label), so the label carries its own scope to keep cell keys unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationScope {
    Building,
    Floor,
    Zone,
    BuildingLabel,
}

impl AnnotationScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::Floor => "floor",
            Self::Zone => "zone",
            Self::BuildingLabel => "building-label",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationMetadata {
    #[serde(default)]
    pub auto_generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<AnnotationScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<BuildingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<FloorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<ZoneId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub id: AnnotationId,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub title: String,
    pub position: Position,
    pub size: Size,
    #[serde(default)]
    pub metadata: AnnotationMetadata,
}

impl Annotation {
    /// Identity key of an auto-generated annotation's hierarchy cell.
    ///
    /// `None` for manual annotations — they have no derived identity and
    /// regeneration must leave them alone.
    pub fn cell_key(&self) -> Option<CellKey> {
        if !self.metadata.auto_generated {
            return None;
        }
        let scope = self.metadata.scope?;
        Some(CellKey {
            scope,
            building_id: self.metadata.building_id.clone(),
            floor_id: self.metadata.floor_id.clone(),
            zone_id: self.metadata.zone_id.clone(),
        })
    }
}

/// Identity of a derived hierarchy cell: `(scope, building, floor, zone)`.
///
/// Keyed lookup on this — not on title or geometry — is what lets
/// regeneration update shapes in place instead of duplicating them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub scope: AnnotationScope,
    pub building_id: Option<BuildingId>,
    pub floor_id: Option<FloorId>,
    pub zone_id: Option<ZoneId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auto_floor_annotation(id: &str) -> Annotation {
        Annotation {
            id: id.into(),
            kind: AnnotationKind::Floor,
            title: "Level 2".into(),
            position: Position::new(0.0, 0.0),
            size: Size::new(100.0, 50.0),
            metadata: AnnotationMetadata {
                auto_generated: true,
                scope: Some(AnnotationScope::Floor),
                building_id: Some("b1".into()),
                floor_id: Some("f2".into()),
                zone_id: None,
            },
        }
    }

    #[test]
    fn test_cell_key_ignores_content() {
        let a = auto_floor_annotation("x");
        let mut b = auto_floor_annotation("y");
        b.title = "renamed".into();
        b.position = Position::new(500.0, 500.0);
        assert_eq!(a.cell_key(), b.cell_key());
    }

    #[test]
    fn test_manual_annotation_has_no_cell_key() {
        let mut a = auto_floor_annotation("x");
        a.metadata.auto_generated = false;
        assert_eq!(a.cell_key(), None);
    }
}
