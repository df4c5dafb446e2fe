//! Drawing tools and the controller that routes map input to them.

mod circle_tool;
mod controller;
mod exchange;
pub mod geocoder;
mod input;
mod path;
mod point_tool;
mod polygon_tool;
mod polyline_tool;
mod snapshot;
mod tool;

#[cfg(test)]
mod tests;

pub use circle_tool::CircleTool;
pub use controller::{ControlBinding, MapControl, MapController};
pub use exchange::{
    ClearMapRequest, ExportMapRequest, FitShapesRequest, ImportSnapshotRequest, LastExport,
    LoadSnapshotRequest, SaveSnapshotRequest, SnapshotError, SnapshotFileOperation,
};
pub use geocoder::{GeocodeAction, GeocodeRequest, GeocoderState};
pub use point_tool::PointTool;
pub use polygon_tool::PolygonTool;
pub use polyline_tool::PolylineTool;
pub use snapshot::{CircleRecord, MapSnapshot, ToolSnapshot};
pub use tool::{ClickOutcome, DrawingTool, Notice, ToolControl, ToolName, ToolOptions, ToolState};

use bevy::prelude::*;

/// Expects a [`MapController`] resource built from the map options
pub struct DrawingPlugin;

impl Plugin for DrawingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapController>()
            .init_resource::<crate::dispatcher::EventDispatcher>()
            .init_resource::<input::PointerState>()
            .init_resource::<LastExport>()
            .init_resource::<SnapshotFileOperation>()
            .init_resource::<SnapshotError>()
            .init_resource::<GeocoderState>()
            .add_message::<ExportMapRequest>()
            .add_message::<ClearMapRequest>()
            .add_message::<FitShapesRequest>()
            .add_message::<ImportSnapshotRequest>()
            .add_message::<SaveSnapshotRequest>()
            .add_message::<LoadSnapshotRequest>()
            .add_message::<GeocodeRequest>()
            .add_systems(
                Update,
                (
                    input::handle_drawing_shortcuts,
                    input::handle_map_pointer,
                    input::update_cursor_icon,
                ),
            )
            .add_systems(
                Update,
                (
                    exchange::clear_map_system.run_if(on_message::<ClearMapRequest>),
                    exchange::import_snapshot_system.run_if(on_message::<ImportSnapshotRequest>),
                    exchange::export_map_system.run_if(on_message::<ExportMapRequest>),
                    exchange::fit_shapes_system.run_if(on_message::<FitShapesRequest>),
                    exchange::save_snapshot_system.run_if(on_message::<SaveSnapshotRequest>),
                    exchange::load_snapshot_system.run_if(on_message::<LoadSnapshotRequest>),
                    exchange::poll_save_snapshot_tasks,
                    exchange::poll_load_snapshot_tasks,
                )
                    .chain()
                    .after(input::handle_map_pointer),
            )
            .add_systems(
                Update,
                (
                    geocoder::start_geocode_system.run_if(on_message::<GeocodeRequest>),
                    geocoder::poll_geocode_tasks,
                ),
            );
    }
}
