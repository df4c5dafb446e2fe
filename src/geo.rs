//! Geographic primitives: coordinates, bounding regions and great-circle math.
//!
//! The map is drawn with an equirectangular projection where one world unit is
//! one degree (`x = lng`, `y = lat`), so conversions to and from world space are
//! plain casts.

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_METERS;

/// A geographic point in degrees, serialized as `{"lat": .., "lng": ..}`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Position of this point in world space
    pub fn to_world(self) -> Vec2 {
        Vec2::new(self.lng as f32, self.lat as f32)
    }

    /// Point under a world-space position, with latitude clamped to the poles
    pub fn from_world(world: Vec2) -> Self {
        Self {
            lat: (world.y as f64).clamp(-90.0, 90.0),
            lng: world.x as f64,
        }
    }

    /// Parses `"lat, lng"` (comma or whitespace separated) into a point
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let lat: f64 = parts.next()?.parse().ok()?;
        let lng: f64 = parts.next()?.parse().ok()?;
        if parts.next().is_some() || !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng)
        {
            return None;
        }
        Some(Self { lat, lng })
    }
}

/// Growable bounding region; starts empty and covers every point it is extended with
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LatLngBounds {
    corners: Option<(LatLng, LatLng)>,
}

impl LatLngBounds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_corners(south_west: LatLng, north_east: LatLng) -> Self {
        let mut bounds = Self::new();
        bounds.extend(south_west);
        bounds.extend(north_east);
        bounds
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_none()
    }

    pub fn south_west(&self) -> Option<LatLng> {
        self.corners.map(|(sw, _)| sw)
    }

    pub fn north_east(&self) -> Option<LatLng> {
        self.corners.map(|(_, ne)| ne)
    }

    pub fn extend(&mut self, point: LatLng) {
        self.corners = Some(match self.corners {
            None => (point, point),
            Some((sw, ne)) => (
                LatLng::new(sw.lat.min(point.lat), sw.lng.min(point.lng)),
                LatLng::new(ne.lat.max(point.lat), ne.lng.max(point.lng)),
            ),
        });
    }

    /// Grow to cover another bounding region
    pub fn union(&mut self, other: &LatLngBounds) {
        if let Some((sw, ne)) = other.corners {
            self.extend(sw);
            self.extend(ne);
        }
    }

    pub fn center(&self) -> Option<LatLng> {
        self.corners.map(|(sw, ne)| {
            LatLng::new((sw.lat + ne.lat) / 2.0, (sw.lng + ne.lng) / 2.0)
        })
    }

    /// Latitude and longitude extent in degrees
    pub fn span(&self) -> Option<(f64, f64)> {
        self.corners
            .map(|(sw, ne)| (ne.lat - sw.lat, ne.lng - sw.lng))
    }

    pub fn contains(&self, point: LatLng) -> bool {
        self.corners.is_some_and(|(sw, ne)| {
            point.lat >= sw.lat && point.lat <= ne.lat && point.lng >= sw.lng && point.lng <= ne.lng
        })
    }
}

/// Great-circle distance in meters between two points (haversine formula)
pub fn distance(point1: LatLng, point2: LatLng) -> f64 {
    let d_lat = (point2.lat - point1.lat).to_radians();
    let d_lng = (point2.lng - point1.lng).to_radians();
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + point1.lat.to_radians().cos()
            * point2.lat.to_radians().cos()
            * (d_lng / 2.0).sin()
            * (d_lng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Point reached travelling `meters` from `origin` along the initial bearing (degrees from north)
pub fn destination(origin: LatLng, bearing_deg: f64, meters: f64) -> LatLng {
    let delta = meters / EARTH_RADIUS_METERS;
    let theta = bearing_deg.to_radians();
    let phi1 = origin.lat.to_radians();
    let lambda1 = origin.lng.to_radians();

    let phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * phi2.sin());

    LatLng::new(phi2.to_degrees(), lambda2.to_degrees())
}

/// Bounding region covering a circle of `radius` meters around `center`
pub fn circle_bounds(center: LatLng, radius: f64) -> LatLngBounds {
    let mut bounds = LatLngBounds::new();
    for bearing in [0.0, 90.0, 180.0, 270.0] {
        bounds.extend(destination(center, bearing, radius));
    }
    bounds
}
