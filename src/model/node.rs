//! Equipment nodes — the tagged union `Source | Valve | Fitting`.
//!
//! Per-kind fields live on the variant payloads; everything shared
//! (identity, hierarchy references, position) lives on [`NodeBase`].
//! The wire shape stays flat: the union is internally tagged on
//! `nodeType` and the base is flattened into each variant.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{BuildingId, FloorId, NodeId, Position, ZoneId};
use crate::{Error, Result};

// ============================================================================
// Gas types
// ============================================================================

/// Medical-gas service carried by equipment and pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GasType {
    Oxygen,
    NitrousOxide,
    MedicalAir,
    Vacuum,
    Nitrogen,
    CarbonDioxide,
}

impl GasType {
    /// All services, in the lane order the layout engine draws them.
    pub const ALL: &[Self] = &[
        Self::Oxygen,
        Self::NitrousOxide,
        Self::MedicalAir,
        Self::Vacuum,
        Self::Nitrogen,
        Self::CarbonDioxide,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Oxygen => "oxygen",
            Self::NitrousOxide => "nitrous-oxide",
            Self::MedicalAir => "medical-air",
            Self::Vacuum => "vacuum",
            Self::Nitrogen => "nitrogen",
            Self::CarbonDioxide => "carbon-dioxide",
        }
    }
}

impl std::fmt::Display for GasType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GasType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| Error::UnknownGasType(s.to_owned()))
    }
}

// ============================================================================
// Node kind / valve state
// ============================================================================

/// Discriminant of the node union, for histograms and filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Source,
    Valve,
    Fitting,
}

impl NodeKind {
    pub const ALL: &[Self] = &[Self::Source, Self::Valve, Self::Fitting];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Valve => "valve",
            Self::Fitting => "fitting",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownNodeKind(s.to_owned()))
    }
}

/// Open/closed state of a shutoff valve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValveState {
    Open,
    Closed,
}

// ============================================================================
// Node base
// ============================================================================

/// Fields shared by every node kind.
///
/// Hierarchy references are independently optional: a node may carry a
/// `building_id` with no `floor_id`. Absent references degrade to the
/// "unassigned" bucket in layout and impact partitioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeBase {
    pub id: NodeId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_type: Option<GasType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_id: Option<BuildingId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_id: Option<FloorId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_id: Option<ZoneId>,
    #[serde(default)]
    pub position: Position,
}

impl NodeBase {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gas_type: None,
            building_id: None,
            floor_id: None,
            zone_id: None,
            position: Position::default(),
        }
    }

    pub fn with_gas(mut self, gas: GasType) -> Self {
        self.gas_type = Some(gas);
        self
    }

    pub fn with_building(mut self, id: impl Into<BuildingId>) -> Self {
        self.building_id = Some(id.into());
        self
    }

    pub fn with_floor(mut self, id: impl Into<FloorId>) -> Self {
        self.floor_id = Some(id.into());
        self
    }

    pub fn with_zone(mut self, id: impl Into<ZoneId>) -> Self {
        self.zone_id = Some(id.into());
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }
}

// ============================================================================
// Node variants
// ============================================================================

/// Gas source: manifold, concentrator, or bulk tank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

/// Shutoff or zone valve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValveNode {
    #[serde(flatten)]
    pub base: NodeBase,
    pub state: ValveState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valve_type: Option<String>,
}

/// Junction, outlet strip, or terminal unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FittingNode {
    #[serde(flatten)]
    pub base: NodeBase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitting_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlet_count: Option<u32>,
}

/// A piece of gas-distribution equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "nodeType", rename_all = "lowercase")]
pub enum Node {
    Source(SourceNode),
    Valve(ValveNode),
    Fitting(FittingNode),
}

impl Node {
    pub fn source(base: NodeBase) -> Self {
        Self::Source(SourceNode { base, source_type: None })
    }

    pub fn valve(base: NodeBase, state: ValveState) -> Self {
        Self::Valve(ValveNode { base, state, valve_type: None })
    }

    pub fn fitting(base: NodeBase) -> Self {
        Self::Fitting(FittingNode { base, fitting_type: None, outlet_count: None })
    }

    pub fn base(&self) -> &NodeBase {
        match self {
            Self::Source(n) => &n.base,
            Self::Valve(n) => &n.base,
            Self::Fitting(n) => &n.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut NodeBase {
        match self {
            Self::Source(n) => &mut n.base,
            Self::Valve(n) => &mut n.base,
            Self::Fitting(n) => &mut n.base,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Source(_) => NodeKind::Source,
            Self::Valve(_) => NodeKind::Valve,
            Self::Fitting(_) => NodeKind::Fitting,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    pub fn gas_type(&self) -> Option<GasType> {
        self.base().gas_type
    }

    pub fn position(&self) -> Position {
        self.base().position
    }

    pub fn is_valve(&self) -> bool {
        matches!(self, Self::Valve(_))
    }

    /// Copy of this node with a new position (layout output).
    pub fn with_position(&self, position: Position) -> Self {
        let mut copy = self.clone();
        copy.base_mut().position = position;
        copy
    }
}

// ============================================================================
// Tests
// ============================================================================
