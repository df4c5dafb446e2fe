//! Polygon tool for drawing closed shapes vertex by vertex.

use bevy::prelude::*;

use crate::error::GeodrawerError;
use crate::geo::LatLng;
use crate::map::{MapSurface, ShapeId};

use super::path::{replay_paths, PathDrawing};
use super::snapshot::ToolSnapshot;
use super::tool::{ClickOutcome, DrawingTool, ToolName, ToolOptions, ToolState};

/// Draws editable closed polygons, one vertex per click
pub struct PolygonTool {
    state: ToolState,
    drawing: PathDrawing,
}

impl PolygonTool {
    pub fn new(ctrl: Option<String>, options: ToolOptions) -> Self {
        Self {
            state: ToolState::new(ToolName::Polygon, ctrl, options),
            drawing: PathDrawing::default(),
        }
    }
}

impl DrawingTool for PolygonTool {
    fn state(&self) -> &ToolState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ToolState {
        &mut self.state
    }

    fn tips_text(&self) -> &'static str {
        "Click on the map to add polygon's vertices, click the menu voice again to create a new shape. \
         Right click on existing polygons to delete them"
    }

    fn prepare_tool(&mut self) {
        self.state.set_next_shape(true);
    }

    fn click_handler(&mut self, surface: &mut MapSurface, at: LatLng) -> ClickOutcome {
        self.drawing
            .click(&mut self.state, surface, at, MapSurface::add_polygon)
    }

    fn delete_item(&mut self, surface: &mut MapSurface, id: ShapeId) -> bool {
        self.drawing.delete(&mut self.state, surface, id)
    }

    fn clear(&mut self, surface: &mut MapSurface) {
        for id in self.state.take_items() {
            surface.remove(id);
        }
        self.drawing.reset(&mut self.state);
        info!("geodrawer: polygons cleared");
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
