//! Export/import data: plain coordinate records per tool, and the combined map snapshot.

use serde::{Deserialize, Serialize};

use crate::error::GeodrawerError;
use crate::geo::LatLng;

use super::tool::ToolName;

/// A circle as exported: center coordinates and radius in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleRecord {
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
}

impl CircleRecord {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Data exported by a single tool.
///
/// Circles are tried first when reading JSON so that `radius` is not dropped
/// by the point form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolSnapshot {
    Circles(Vec<CircleRecord>),
    Points(Vec<LatLng>),
    Paths(Vec<Vec<LatLng>>),
}

impl ToolSnapshot {
    pub fn len(&self) -> usize {
        match self {
            ToolSnapshot::Circles(records) => records.len(),
            ToolSnapshot::Points(points) => points.len(),
            ToolSnapshot::Paths(paths) => paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every tool's export in one JSON object keyed by tool name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<Vec<LatLng>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polyline: Option<Vec<Vec<LatLng>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Vec<Vec<LatLng>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circle: Option<Vec<CircleRecord>>,
}

impl MapSnapshot {
    pub fn get(&self, tool: ToolName) -> Option<ToolSnapshot> {
        match tool {
            ToolName::Point => self.point.clone().map(ToolSnapshot::Points),
            ToolName::Polyline => self.polyline.clone().map(ToolSnapshot::Paths),
            ToolName::Polygon => self.polygon.clone().map(ToolSnapshot::Paths),
            ToolName::Circle => self.circle.clone().map(ToolSnapshot::Circles),
        }
    }

    pub fn insert(&mut self, tool: ToolName, data: ToolSnapshot) -> Result<(), GeodrawerError> {
        match (tool, data) {
            (ToolName::Point, ToolSnapshot::Points(points)) => self.point = Some(points),
            (ToolName::Polyline, ToolSnapshot::Paths(paths)) => self.polyline = Some(paths),
            (ToolName::Polygon, ToolSnapshot::Paths(paths)) => self.polygon = Some(paths),
            (ToolName::Circle, ToolSnapshot::Circles(records)) => self.circle = Some(records),
            // Empty lists carry no shape kind
            (tool, data) if data.is_empty() => self.insert_empty(tool),
            (tool, _) => return Err(GeodrawerError::SnapshotMismatch { tool }),
        }
        Ok(())
    }

    fn insert_empty(&mut self, tool: ToolName) {
        match tool {
            ToolName::Point => self.point = Some(Vec::new()),
            ToolName::Polyline => self.polyline = Some(Vec::new()),
            ToolName::Polygon => self.polygon = Some(Vec::new()),
            ToolName::Circle => self.circle = Some(Vec::new()),
        }
    }

    /// Tools present in the snapshot
    pub fn tools(&self) -> impl Iterator<Item = ToolName> + '_ {
        ToolName::ALL
            .into_iter()
            .filter(|tool| self.get(*tool).is_some())
    }

    pub fn to_json_pretty(&self) -> Result<String, GeodrawerError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GeodrawerError> {
        Ok(serde_json::from_str(json)?)
    }
}
