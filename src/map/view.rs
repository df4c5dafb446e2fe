use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::{DEFAULT_CENTER, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use crate::geo::{LatLng, LatLngBounds};

#[derive(Component)]
pub struct MapCamera;

/// What part of the world the map shows
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: f32,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: LatLng::new(DEFAULT_CENTER[0], DEFAULT_CENTER[1]),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapView {
    pub fn units_per_pixel(&self) -> f32 {
        units_per_pixel(self.zoom)
    }
}

/// Request to center and zoom the map so that a region is fully visible
#[derive(Message)]
pub struct FitBoundsRequest {
    pub bounds: LatLngBounds,
}

/// Request to recenter the map without changing the zoom
#[derive(Message)]
pub struct CenterMapRequest {
    pub center: LatLng,
}

/// World units (degrees) covered by one screen pixel at a zoom level
pub fn units_per_pixel(zoom: f32) -> f32 {
    360.0 / (TILE_SIZE * 2f32.powf(zoom))
}

/// View that fits `bounds` inside a viewport, leaving a margin around it.
/// A single point keeps the current zoom unless it is too far out.
pub fn fit_view(bounds: &LatLngBounds, viewport: Vec2, current_zoom: f32) -> Option<MapView> {
    let center = bounds.center()?;
    let (lat_span, lng_span) = bounds.span()?;

    let usable = viewport * 0.9;
    let zoom = if lat_span <= f64::EPSILON && lng_span <= f64::EPSILON {
        current_zoom.max(12.0)
    } else {
        let zoom_for = |span: f64, pixels: f32| {
            if span <= f64::EPSILON {
                MAX_ZOOM
            } else {
                (360.0 * pixels / (TILE_SIZE * span as f32)).log2()
            }
        };
        zoom_for(lng_span, usable.x).min(zoom_for(lat_span, usable.y))
    };

    Some(MapView {
        center,
        zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
    })
}

pub fn spawn_camera(mut commands: Commands, view: Res<MapView>) {
    commands.spawn((
        Camera2d,
        MapCamera,
        Transform::from_translation(view.center.to_world().extend(1000.0)),
    ));
}

pub fn camera_pan(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<bevy::input::mouse::MouseMotion>,
    mut view: ResMut<MapView>,
) {
    if !mouse_button.pressed(MouseButton::Middle) {
        mouse_motion.clear();
        return;
    }

    let scale = view.units_per_pixel() as f64;
    for event in mouse_motion.read() {
        view.center.lng -= event.delta.x as f64 * scale;
        view.center.lat = (view.center.lat + event.delta.y as f64 * scale).clamp(-90.0, 90.0);
    }
}

pub fn camera_zoom(mut scroll_events: MessageReader<MouseWheel>, mut view: ResMut<MapView>) {
    for event in scroll_events.read() {
        let scroll_amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.5,
            MouseScrollUnit::Pixel => event.y * 0.01,
        };

        view.zoom = (view.zoom + scroll_amount).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

pub fn apply_map_view(
    view: Res<MapView>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<MapCamera>>,
) {
    if !view.is_changed() {
        return;
    }

    for (mut transform, mut projection) in camera_query.iter_mut() {
        let world = view.center.to_world();
        transform.translation.x = world.x;
        transform.translation.y = world.y;
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = view.units_per_pixel();
        }
    }
}

pub fn fit_bounds_system(
    mut events: MessageReader<FitBoundsRequest>,
    mut view: ResMut<MapView>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let viewport = window_query
        .single()
        .map(|w| Vec2::new(w.width(), w.height()))
        .unwrap_or(Vec2::new(
            crate::constants::DEFAULT_WINDOW_WIDTH,
            crate::constants::DEFAULT_WINDOW_HEIGHT,
        ));

    for event in events.read() {
        match fit_view(&event.bounds, viewport, view.zoom) {
            Some(fitted) => *view = fitted,
            None => debug!("geodrawer: nothing to fit, map view unchanged"),
        }
    }
}

pub fn center_map_system(mut events: MessageReader<CenterMapRequest>, mut view: ResMut<MapView>) {
    for event in events.read() {
        view.center = event.center;
    }
}
