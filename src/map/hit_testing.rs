//! Hit testing functions for detecting clicks on shapes.
//!
//! All positions and thresholds are in world units (degrees).

use bevy::prelude::*;

use crate::geo::{self, LatLng};

use super::shapes::Shape;

/// Check if a point is within a given distance of a line segment
fn point_near_segment(point: Vec2, seg_start: Vec2, seg_end: Vec2, threshold: f32) -> bool {
    let line_vec = seg_end - seg_start;
    let line_len_sq = line_vec.length_squared();

    if line_len_sq < 1e-12 {
        // Segment is essentially a point
        return point.distance(seg_start) <= threshold;
    }

    // Project point onto line, clamped to segment
    let t = ((point - seg_start).dot(line_vec) / line_len_sq).clamp(0.0, 1.0);
    let projection = seg_start + line_vec * t;

    point.distance(projection) <= threshold
}

/// Check if a point is near an open path
pub fn point_near_path(point: Vec2, path: &[LatLng], threshold: f32) -> bool {
    match path {
        [] => false,
        [only] => point.distance(only.to_world()) <= threshold,
        _ => path
            .windows(2)
            .any(|w| point_near_segment(point, w[0].to_world(), w[1].to_world(), threshold)),
    }
}

/// Even-odd test for a point inside a closed ring
pub fn point_in_polygon(point: Vec2, ring: &[LatLng]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i].to_world();
        let b = ring[j].to_world();
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Check if a point is inside a polygon or near its outline (closing edge included)
pub fn point_near_polygon(point: Vec2, ring: &[LatLng], threshold: f32) -> bool {
    if point_in_polygon(point, ring) || point_near_path(point, ring, threshold) {
        return true;
    }
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 2 => {
            point_near_segment(point, last.to_world(), first.to_world(), threshold)
        }
        _ => false,
    }
}

/// Check if a point is inside a circle of `radius` meters
pub fn point_in_circle(point: Vec2, center: LatLng, radius: f64, threshold: f32) -> bool {
    if point.distance(center.to_world()) <= threshold {
        return true;
    }
    geo::distance(center, LatLng::from_world(point)) <= radius
}

/// Check if a point hits any part of a shape
pub fn point_hits_shape(point: Vec2, shape: &Shape, threshold: f32) -> bool {
    match shape {
        Shape::Marker { position, .. } => point.distance(position.to_world()) <= threshold,
        Shape::Polyline { path } => point_near_path(point, path, threshold),
        Shape::Polygon { path } => point_near_polygon(point, path, threshold),
        Shape::Circle { center, radius } => point_in_circle(point, *center, *radius, threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<LatLng> {
        vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_point_near_path_segment() {
        let path = vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 2.0)];
        assert!(point_near_path(Vec2::new(1.0, 0.05), &path, 0.1));
        assert!(!point_near_path(Vec2::new(1.0, 0.5), &path, 0.1));
    }

    #[test]
    fn test_point_near_single_vertex_path() {
        let path = vec![LatLng::new(45.0, 7.0)];
        assert!(point_near_path(Vec2::new(7.01, 45.0), &path, 0.05));
        assert!(!point_near_path(Vec2::new(8.0, 45.0), &path, 0.05));
    }

    #[test]
    fn test_point_in_polygon() {
        let ring = square();
        assert!(point_in_polygon(Vec2::new(0.5, 0.5), &ring));
        assert!(!point_in_polygon(Vec2::new(1.5, 0.5), &ring));
    }

    #[test]
    fn test_polygon_closing_edge_is_hit() {
        let ring = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
        ];
        // Near the closing edge from (1,1) back to (0,0), outside the triangle
        assert!(point_near_polygon(Vec2::new(0.45, 0.55), &ring, 0.1));
    }

    #[test]
    fn test_point_in_circle() {
        let center = LatLng::new(0.0, 0.0);
        // ~111km per degree at the equator
        assert!(point_in_circle(Vec2::new(0.5, 0.0), center, 60_000.0, 0.01));
        assert!(!point_in_circle(Vec2::new(0.6, 0.0), center, 60_000.0, 0.01));
    }

    #[test]
    fn test_marker_hit() {
        let marker = Shape::Marker {
            position: LatLng::new(45.0, 7.0),
            draggable: true,
        };
        assert!(point_hits_shape(Vec2::new(7.0, 45.0), &marker, 0.01));
        assert!(!point_hits_shape(Vec2::new(7.1, 45.0), &marker, 0.01));
    }
}
