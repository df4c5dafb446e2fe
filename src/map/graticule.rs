use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::theme;

use super::view::MapView;

/// Candidate spacings in degrees, coarse to fine
const STEPS: [f32; 14] = [
    30.0, 10.0, 5.0, 2.0, 1.0, 0.5, 0.2, 0.1, 0.05, 0.02, 0.01, 0.005, 0.002, 0.001,
];

/// Minimum on-screen distance between two graticule lines
const MIN_SPACING_PX: f32 = 80.0;

/// Finest spacing that keeps lines at least `MIN_SPACING_PX` apart
pub fn graticule_step(units_per_pixel: f32) -> f32 {
    let min_step = MIN_SPACING_PX * units_per_pixel;
    STEPS
        .iter()
        .rev()
        .copied()
        .find(|step| *step >= min_step)
        .unwrap_or(STEPS[0])
}

pub fn draw_graticule(
    mut gizmos: Gizmos,
    view: Res<MapView>,
    window_query: Query<&Window, With<PrimaryWindow>>,
) {
    let (width, height) = window_query
        .single()
        .map(|w| (w.width(), w.height()))
        .unwrap_or((DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT));

    let scale = view.units_per_pixel();
    let step = graticule_step(scale);
    let center = view.center.to_world();

    let half_w = width * scale / 2.0;
    let half_h = height * scale / 2.0;

    let min_x = (center.x - half_w).max(-180.0);
    let max_x = (center.x + half_w).min(180.0);
    let min_y = (center.y - half_h).max(-90.0);
    let max_y = (center.y + half_h).min(90.0);

    if min_x < max_x {
        let start = (min_x / step).ceil() as i64;
        let end = (max_x / step).floor() as i64;
        for i in start..=end {
            let x = i as f32 * step;
            let color = if i == 0 {
                theme::GRATICULE_MAJOR_COLOR
            } else {
                theme::GRATICULE_COLOR
            };
            gizmos.line_2d(Vec2::new(x, min_y), Vec2::new(x, max_y), color);
        }
    }

    if min_y < max_y {
        let start = (min_y / step).ceil() as i64;
        let end = (max_y / step).floor() as i64;
        for i in start..=end {
            let y = i as f32 * step;
            let color = if i == 0 {
                theme::GRATICULE_MAJOR_COLOR
            } else {
                theme::GRATICULE_COLOR
            };
            gizmos.line_2d(Vec2::new(min_x, y), Vec2::new(max_x, y), color);
        }
    }

    gizmos.rect_2d(
        Isometry2d::from_translation(Vec2::ZERO),
        Vec2::new(360.0, 180.0),
        theme::WORLD_OUTLINE,
    );
}
