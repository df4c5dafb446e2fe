//! Polyline tool for drawing open paths vertex by vertex.

use bevy::prelude::*;

use crate::error::GeodrawerError;
use crate::geo::LatLng;
use crate::map::{MapSurface, ShapeId};

use super::path::{replay_paths, PathDrawing};
use super::snapshot::ToolSnapshot;
use super::tool::{ClickOutcome, DrawingTool, ToolName, ToolOptions, ToolState};

/// Draws editable polylines; the first click starts a shape, later clicks extend it
pub struct PolylineTool {
    state: ToolState,
    drawing: PathDrawing,
}

impl PolylineTool {
    pub fn new(ctrl: Option<String>, options: ToolOptions) -> Self {
        Self {
            state: ToolState::new(ToolName::Polyline, ctrl, options),
            drawing: PathDrawing::default(),
        }
    }
}

impl DrawingTool for PolylineTool {
    fn state(&self) -> &ToolState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ToolState {
        &mut self.state
    }

    fn tips_text(&self) -> &'static str {
        "Click on the map to add polyline points, click the menu voice again to create a new polyline. \
         Right click on existing polylines to delete them"
    }

    fn prepare_tool(&mut self) {
        self.state.set_next_shape(true);
    }

    fn click_handler(&mut self, surface: &mut MapSurface, at: LatLng) -> ClickOutcome {
        self.drawing
            .click(&mut self.state, surface, at, MapSurface::add_polyline)
    }

    fn delete_item(&mut self, surface: &mut MapSurface, id: ShapeId) -> bool {
        self.drawing.delete(&mut self.state, surface, id)
    }

    fn clear(&mut self, surface: &mut MapSurface) {
        for id in self.state.take_items() {
            surface.remove(id);
        }
        self.drawing.reset(&mut self.state);
        info!("geodrawer: polylines cleared");
    }

    fn export_data(&self, surface: &MapSurface) -> ToolSnapshot {
        PathDrawing::export(&self.state, surface)
    }

    fn import_data(
        &mut self,
        surface: &mut MapSurface,
        data: &ToolSnapshot,
    ) -> Result<usize, GeodrawerError> {
        let paths = PathDrawing::import_paths(&self.state, data)?;
        Ok(replay_paths(self, surface, paths))
    }
}
