//! Shape types held by the map surface.

use crate::geo::{self, LatLng, LatLngBounds};

/// Stable handle to a shape on the surface. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShapeId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Marker { position: LatLng, draggable: bool },
    Polyline { path: Vec<LatLng> },
    Polygon { path: Vec<LatLng> },
    Circle { center: LatLng, radius: f64 },
}

impl Shape {
    /// Ordered vertices of a polyline or polygon
    pub fn path(&self) -> Option<&[LatLng]> {
        match self {
            Shape::Polyline { path } | Shape::Polygon { path } => Some(path),
            _ => None,
        }
    }

    /// Region covered by the shape, circles included up to their radius
    pub fn bounds(&self) -> LatLngBounds {
        match self {
            Shape::Marker { position, .. } => LatLngBounds::from_corners(*position, *position),
            Shape::Polyline { path } | Shape::Polygon { path } => {
                let mut bounds = LatLngBounds::new();
                for point in path {
                    bounds.extend(*point);
                }
                bounds
            }
            Shape::Circle { center, radius } => geo::circle_bounds(*center, *radius),
        }
    }
}

/// Draggable part of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// Marker position
    Position,
    /// Path vertex by index
    Vertex(usize),
    /// Circle center
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleRef {
    pub shape: ShapeId,
    pub handle: Handle,
}
