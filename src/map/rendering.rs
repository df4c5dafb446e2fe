//! Rendering systems for shapes on the map surface (gizmos).

use bevy::gizmos::prelude::*;
use bevy::prelude::*;

use crate::constants::CIRCLE_SEGMENTS;
use crate::geo::{self, LatLng};
use crate::theme;

use super::shapes::Shape;
use super::surface::MapSurface;
use super::view::MapView;

/// Marker cross half-size and handle half-size, in screen pixels
const MARKER_SIZE_PX: f32 = 7.0;
const HANDLE_SIZE_PX: f32 = 3.0;

/// Outline of a circle as a closed ring of world positions
pub fn circle_outline(center: LatLng, radius: f64, segments: usize) -> Vec<Vec2> {
    (0..=segments)
        .map(|i| {
            let bearing = 360.0 * i as f64 / segments as f64;
            geo::destination(center, bearing, radius).to_world()
        })
        .collect()
}

pub fn render_shapes(mut gizmos: Gizmos, surface: Res<MapSurface>, view: Res<MapView>) {
    let px = view.units_per_pixel();

    for (_, shape) in surface.iter() {
        match shape {
            Shape::Marker { position, .. } => {
                let p = position.to_world();
                let d = MARKER_SIZE_PX * px;
                gizmos.line_2d(p - Vec2::new(d, 0.0), p + Vec2::new(d, 0.0), theme::MARKER_COLOR);
                gizmos.line_2d(p - Vec2::new(0.0, d), p + Vec2::new(0.0, d), theme::MARKER_COLOR);
                gizmos.circle_2d(Isometry2d::from_translation(p), d, theme::MARKER_COLOR);
            }
            Shape::Polyline { path } => {
                gizmos.linestrip_2d(path.iter().map(|v| v.to_world()), theme::POLYLINE_COLOR);
                draw_vertex_handles(&mut gizmos, path, px);
            }
            Shape::Polygon { path } => {
                let ring = path.iter().chain(path.first()).map(|v| v.to_world());
                gizmos.linestrip_2d(ring, theme::POLYGON_COLOR);
                draw_vertex_handles(&mut gizmos, path, px);
            }
            Shape::Circle { center, radius } => {
                gizmos.linestrip_2d(
                    circle_outline(*center, *radius, CIRCLE_SEGMENTS),
                    theme::CIRCLE_COLOR,
                );
                draw_handle(&mut gizmos, center.to_world(), px);
            }
        }
    }
}

fn draw_vertex_handles(gizmos: &mut Gizmos, path: &[LatLng], px: f32) {
    for vertex in path {
        draw_handle(gizmos, vertex.to_world(), px);
    }
}

fn draw_handle(gizmos: &mut Gizmos, at: Vec2, px: f32) {
    gizmos.rect_2d(
        Isometry2d::from_translation(at),
        Vec2::splat(HANDLE_SIZE_PX * 2.0 * px),
        theme::HANDLE_COLOR,
    );
}
