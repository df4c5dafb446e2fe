//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels (also used for fit-to-bounds calculations)
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels (also used for fit-to-bounds calculations)
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Mean earth radius in meters used by the haversine distance
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Radius in meters given to a freshly anchored circle before it is sized
pub const INITIAL_CIRCLE_RADIUS: f64 = 1.0;

/// Initial map center (lat, lng) when the config does not set one
pub const DEFAULT_CENTER: [f64; 2] = [45.0, 7.0];

/// Initial map zoom level when the config does not set one
pub const DEFAULT_ZOOM: f32 = 8.0;

/// Zoom level limits for the map view
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 20.0;

/// Side of a map tile in pixels; zoom level `z` shows 256 * 2^z pixels around the world
pub const TILE_SIZE: f32 = 256.0;

/// Hit radius around markers, vertices and circle outlines, in screen pixels
pub const HIT_TOLERANCE_PX: f32 = 8.0;

/// Pointer travel (pixels) after which a press becomes a drag instead of a click
pub const CLICK_DRAG_THRESHOLD_PX: f32 = 4.0;

/// Number of segments used to draw a circle outline
pub const CIRCLE_SEGMENTS: usize = 64;

/// Maximum number of recent export files to remember in config
pub const MAX_RECENT_EXPORTS: usize = 5;

/// Event emitted once the library finished bootstrapping
pub const READY_EVENT: &str = "geodrawer-loaded";

/// Event emitted whenever the export control produces a snapshot
pub const EXPORTED_EVENT: &str = "geodrawer-exported";
