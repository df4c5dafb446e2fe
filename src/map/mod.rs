//! The map engine: a pannable, zoomable world with shapes drawn on top of it.

mod graticule;
mod hit_testing;
mod params;
mod rendering;
mod shapes;
mod surface;
mod view;

pub use params::{is_cursor_over_ui, CameraParams};
pub use shapes::{HandleRef, Shape, ShapeId};
pub use surface::MapSurface;
pub use view::{CenterMapRequest, FitBoundsRequest, MapView};

use bevy::prelude::*;

use crate::theme;

pub struct MapPlugin;

impl Plugin for MapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapSurface>()
            .init_resource::<MapView>()
            .insert_resource(ClearColor(theme::MAP_BACKGROUND))
            .add_message::<FitBoundsRequest>()
            .add_message::<CenterMapRequest>()
            .add_systems(Startup, view::spawn_camera)
            .add_systems(
                Update,
                (
                    view::camera_pan,
                    view::camera_zoom,
                    view::fit_bounds_system.run_if(on_message::<FitBoundsRequest>),
                    view::center_map_system.run_if(on_message::<CenterMapRequest>),
                    view::apply_map_view,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (graticule::draw_graticule, rendering::render_shapes),
            );
    }
}
