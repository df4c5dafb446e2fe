//! The map surface: every shape drawn over the map, keyed by stable ids.
//!
//! Tools never own shape geometry. They keep `ShapeId`s and go through the
//! surface to create, extend, resize and remove shapes, the same way they would
//! drive a mapping engine.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::geo::LatLng;

use super::hit_testing::point_hits_shape;
use super::shapes::{Handle, HandleRef, Shape, ShapeId};

#[derive(Resource, Debug, Default)]
pub struct MapSurface {
    shapes: BTreeMap<ShapeId, Shape>,
    next_id: u64,
}

impl MapSurface {
    pub fn add(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        id
    }

    pub fn add_marker(&mut self, position: LatLng) -> ShapeId {
        self.add(Shape::Marker {
            position,
            draggable: true,
        })
    }

    pub fn add_polyline(&mut self, start: LatLng) -> ShapeId {
        self.add(Shape::Polyline { path: vec![start] })
    }

    pub fn add_polygon(&mut self, start: LatLng) -> ShapeId {
        self.add(Shape::Polygon { path: vec![start] })
    }

    pub fn add_circle(&mut self, center: LatLng, radius: f64) -> ShapeId {
        self.add(Shape::Circle { center, radius })
    }

    /// Take a shape off the map
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        self.shapes.remove(&id)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in creation order
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, &Shape)> {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    pub fn path(&self, id: ShapeId) -> Option<&[LatLng]> {
        self.get(id).and_then(Shape::path)
    }

    /// Append a vertex to a polyline or polygon
    pub fn push_vertex(&mut self, id: ShapeId, point: LatLng) -> bool {
        match self.shapes.get_mut(&id) {
            Some(Shape::Polyline { path }) | Some(Shape::Polygon { path }) => {
                path.push(point);
                true
            }
            _ => false,
        }
    }

    pub fn set_radius(&mut self, id: ShapeId, meters: f64) -> bool {
        match self.shapes.get_mut(&id) {
            Some(Shape::Circle { radius, .. }) => {
                *radius = meters;
                true
            }
            _ => false,
        }
    }

    /// Move a draggable handle (marker position, path vertex, circle center)
    pub fn move_handle(&mut self, handle: HandleRef, to: LatLng) -> bool {
        match (self.shapes.get_mut(&handle.shape), handle.handle) {
            (Some(Shape::Marker { position, draggable }), Handle::Position) if *draggable => {
                *position = to;
                true
            }
            (Some(Shape::Polyline { path }), Handle::Vertex(i))
            | (Some(Shape::Polygon { path }), Handle::Vertex(i)) => match path.get_mut(i) {
                Some(vertex) => {
                    *vertex = to;
                    true
                }
                None => false,
            },
            (Some(Shape::Circle { center, .. }), Handle::Center) => {
                *center = to;
                true
            }
            _ => false,
        }
    }

    /// Topmost (most recently created) shape under a world position
    pub fn shape_at(&self, world: Vec2, threshold: f32) -> Option<ShapeId> {
        self.shapes
            .iter()
            .rev()
            .find(|(_, shape)| point_hits_shape(world, shape, threshold))
            .map(|(id, _)| *id)
    }

    /// Topmost draggable handle under a world position
    pub fn handle_at(&self, world: Vec2, threshold: f32) -> Option<HandleRef> {
        for (id, shape) in self.shapes.iter().rev() {
            let handle = match shape {
                Shape::Marker {
                    position,
                    draggable: true,
                } if world.distance(position.to_world()) <= threshold => Some(Handle::Position),
                Shape::Polyline { path } | Shape::Polygon { path } => path
                    .iter()
                    .rposition(|v| world.distance(v.to_world()) <= threshold)
                    .map(Handle::Vertex),
                Shape::Circle { center, .. } if world.distance(center.to_world()) <= threshold => {
                    Some(Handle::Center)
                }
                _ => None,
            };
            if let Some(handle) = handle {
                return Some(HandleRef { shape: *id, handle });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_not_reused() {
        let mut surface = MapSurface::default();
        let a = surface.add_marker(LatLng::new(1.0, 1.0));
        surface.remove(a);
        let b = surface.add_marker(LatLng::new(1.0, 1.0));
        assert_ne!(a, b);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_push_vertex_only_on_paths() {
        let mut surface = MapSurface::default();
        let line = surface.add_polyline(LatLng::new(45.0, 7.0));
        let marker = surface.add_marker(LatLng::new(45.0, 7.0));
        assert!(surface.push_vertex(line, LatLng::new(46.0, 7.0)));
        assert!(!surface.push_vertex(marker, LatLng::new(46.0, 7.0)));
        assert_eq!(surface.path(line).map(<[LatLng]>::len), Some(2));
    }

    #[test]
    fn test_set_radius_only_on_circles() {
        let mut surface = MapSurface::default();
        let circle = surface.add_circle(LatLng::new(0.0, 0.0), 1.0);
        let polygon = surface.add_polygon(LatLng::new(0.0, 0.0));
        assert!(surface.set_radius(circle, 500.0));
        assert!(!surface.set_radius(polygon, 500.0));
        assert_eq!(
            surface.get(circle),
            Some(&Shape::Circle {
                center: LatLng::new(0.0, 0.0),
                radius: 500.0
            })
        );
    }

    #[test]
    fn test_shape_at_prefers_topmost() {
        let mut surface = MapSurface::default();
        let below = surface.add_circle(LatLng::new(0.0, 0.0), 50_000.0);
        let above = surface.add_marker(LatLng::new(0.0, 0.0));
        assert_eq!(surface.shape_at(Vec2::ZERO, 0.01), Some(above));
        surface.remove(above);
        assert_eq!(surface.shape_at(Vec2::ZERO, 0.01), Some(below));
        assert_eq!(surface.shape_at(Vec2::new(5.0, 5.0), 0.01), None);
    }

    #[test]
    fn test_move_vertex_handle() {
        let mut surface = MapSurface::default();
        let line = surface.add_polyline(LatLng::new(0.0, 0.0));
        surface.push_vertex(line, LatLng::new(1.0, 1.0));

        let handle = surface.handle_at(Vec2::new(1.0, 1.0), 0.01).unwrap();
        assert_eq!(handle.handle, Handle::Vertex(1));
        assert!(surface.move_handle(handle, LatLng::new(2.0, 2.0)));
        assert_eq!(surface.path(line).unwrap()[1], LatLng::new(2.0, 2.0));
    }

    #[test]
    fn test_non_draggable_marker_has_no_handle() {
        let mut surface = MapSurface::default();
        surface.add(Shape::Marker {
            position: LatLng::new(0.0, 0.0),
            draggable: false,
        });
        assert!(surface.handle_at(Vec2::ZERO, 0.01).is_none());
    }
}
