//! Circle tool: anchor a center, size by pointer, click to finish.

use bevy::prelude::*;

use crate::constants::INITIAL_CIRCLE_RADIUS;
use crate::error::GeodrawerError;
use crate::geo::{self, LatLng};
use crate::map::{MapSurface, Shape, ShapeId};

use super::snapshot::{CircleRecord, ToolSnapshot};
use super::tool::{ClickOutcome, DrawingTool, ToolName, ToolOptions, ToolState};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum CircleState {
    #[default]
    Idle,
    /// A circle is anchored and its radius follows the pointer
    Sizing { shape: ShapeId, anchor: LatLng },
}

/// Draws circles: click to anchor the center, move to size, click again to finish
pub struct CircleTool {
    state: ToolState,
    circle: CircleState,
}

impl CircleTool {
    pub fn new(ctrl: Option<String>, options: ToolOptions) -> Self {
        Self {
            state: ToolState::new(ToolName::Circle, ctrl, options),
            circle: CircleState::Idle,
        }
    }

    fn finalize(&mut self) -> Option<ShapeId> {
        match std::mem::take(&mut self.circle) {
            CircleState::Sizing { shape, .. } => {
                debug!("geodrawer: circle finalized");
                Some(shape)
            }
            CircleState::Idle => None,
        }
    }
}

impl DrawingTool for CircleTool {
    fn state(&self) -> &ToolState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ToolState {
        &mut self.state
    }

    fn tips_text(&self) -> &'static str {
        "Click on the map to add circles. Right click on existing circles to delete them."
    }

    fn prepare_tool(&mut self) {
        self.state.set_next_shape(true);
    }

    fn click_handler(&mut self, surface: &mut MapSurface, at: LatLng) -> ClickOutcome {
        // While sizing, the edge follows the pointer, so a click lands on the circle
        if let Some(shape) = self.finalize() {
            return ClickOutcome::Finalized(shape);
        }

        if self.state.is_full() {
            info!("geodrawer: maximum number of circles reached");
            return ClickOutcome::Rejected;
        }

        let shape = surface.add_circle(at, INITIAL_CIRCLE_RADIUS);
        self.state.add_item(shape);
        self.circle = CircleState::Sizing { shape, anchor: at };
        ClickOutcome::Created(shape)
    }

    fn pointer_moved(&mut self, surface: &mut MapSurface, at: LatLng) -> bool {
        match self.circle {
            CircleState::Sizing { shape, anchor } => {
                surface.set_radius(shape, geo::distance(anchor, at))
            }
            CircleState::Idle => false,
        }
    }

    fn release(&mut self) {
        self.finalize();
    }

    fn delete_item(&mut self, surface: &mut MapSurface, id: ShapeId) -> bool {
        if self.state.remove_item(id).is_none() {
            return false;
        }
        surface.remove(id);
        if matches!(self.circle, CircleState::Sizing { shape, .. } if shape == id) {
            self.circle = CircleState::Idle;
        }
        self.state.set_next_shape(true);
        true
    }

    fn clear(&mut self, surface: &mut MapSurface) {
        for id in self.state.take_items() {
            surface.remove(id);
        }
        self.circle = CircleState::Idle;
        self.state.set_next_shape(true);
        info!("geodrawer: circles cleared");
    }

    fn export_data(&self, surface: &MapSurface) -> ToolSnapshot {
        ToolSnapshot::Circles(
            self.state
                .items()
                .iter()
                .filter_map(|id| match surface.get(*id) {
                    Some(Shape::Circle { center, radius }) => Some(CircleRecord {
                        lat: center.lat,
                        lng: center.lng,
                        radius: *radius,
                    }),
                    _ => None,
                })
                .collect(),
        )
    }

    /// Each record replays an anchoring click, a resize to the recorded radius
    /// and the finalizing click.
    fn import_data(
        &mut self,
        surface: &mut MapSurface,
        data: &ToolSnapshot,
    ) -> Result<usize, GeodrawerError> {
        let records = match data {
            ToolSnapshot::Circles(records) => records.as_slice(),
            other if other.is_empty() => return Ok(0),
            _ => {
                return Err(GeodrawerError::SnapshotMismatch {
                    tool: ToolName::Circle,
                });
            }
        };

        self.release();
        let mut rejected = 0;
        for record in records {
            match self.click_handler(surface, record.center()) {
                ClickOutcome::Created(shape) => {
                    surface.set_radius(shape, record.radius);
                    self.click_handler(surface, record.center());
                }
                _ => rejected += 1,
            }
        }
        Ok(rejected)
    }
}
