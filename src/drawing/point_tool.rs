//! Point tool: places capped markers with single clicks.

use bevy::prelude::*;

use crate::error::GeodrawerError;
use crate::geo::LatLng;
use crate::map::{MapSurface, Shape};

use super::snapshot::ToolSnapshot;
use super::tool::{ClickOutcome, DrawingTool, ToolName, ToolOptions, ToolState};

/// Draws draggable markers, one per click, up to the item cap
pub struct PointTool {
    state: ToolState,
}

impl PointTool {
    pub fn new(ctrl: Option<String>, options: ToolOptions) -> Self {
        Self {
            state: ToolState::new(ToolName::Point, ctrl, options),
        }
    }
}

impl DrawingTool for PointTool {
    fn state(&self) -> &ToolState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ToolState {
        &mut self.state
    }

    fn tips_text(&self) -> &'static str {
        "Click on the map to set draggable markers points. Right click on a marker to delete it"
    }

    fn click_handler(&mut self, surface: &mut MapSurface, at: LatLng) -> ClickOutcome {
        if self.state.is_full() {
            info!("geodrawer: maximum number of points drawn");
            return ClickOutcome::Rejected;
        }

        let marker = surface.add_marker(at);
        self.state.add_item(marker);
        info!("geodrawer: point drawn");
        ClickOutcome::Created(marker)
    }

    fn export_data(&self, surface: &MapSurface) -> ToolSnapshot {
        ToolSnapshot::Points(
            self.state
                .items()
                .iter()
                .filter_map(|id| match surface.get(*id) {
                    Some(Shape::Marker { position, .. }) => Some(*position),
                    _ => None,
                })
                .collect(),
        )
    }

    fn import_data(
        &mut self,
        surface: &mut MapSurface,
        data: &ToolSnapshot,
    ) -> Result<usize, GeodrawerError> {
        let points = match data {
            ToolSnapshot::Points(points) => points.as_slice(),
            other if other.is_empty() => return Ok(0),
            _ => {
                return Err(GeodrawerError::SnapshotMismatch {
                    tool: ToolName::Point,
                });
            }
        };

        let rejected = points
            .iter()
            .filter(|point| self.click_handler(surface, **point) == ClickOutcome::Rejected)
            .count();
        Ok(rejected)
    }
}
