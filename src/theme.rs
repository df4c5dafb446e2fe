//! Centralized color theme for the application.
//!
//! This module provides all colors used for map rendering and the egui controls.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;

// ============================================================================
// Map Colors
// ============================================================================

/// Background behind the world outline
pub const MAP_BACKGROUND: Color = Color::srgb(0.12, 0.14, 0.17);

/// Semi-transparent grey graticule lines
pub const GRATICULE_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.3);

/// Brighter lines for the equator and the prime meridian
pub const GRATICULE_MAJOR_COLOR: Color = Color::srgba(0.6, 0.6, 0.6, 0.6);

/// Outline of the projected world (-180..180, -90..90)
pub const WORLD_OUTLINE: Color = Color::srgba(0.8, 0.8, 0.8, 0.8);

// ============================================================================
// Shape Colors
// ============================================================================

/// Marker cross and ring
pub const MARKER_COLOR: Color = Color::srgb(0.9, 0.2, 0.2);

/// Polyline stroke
pub const POLYLINE_COLOR: Color = Color::srgb(0.2, 0.6, 1.0);

/// Polygon outline
pub const POLYGON_COLOR: Color = Color::srgb(1.0, 0.7, 0.2);

/// Circle outline
pub const CIRCLE_COLOR: Color = Color::srgb(0.3, 0.85, 0.4);

/// Editable vertex handles (paths and circle centers)
pub const HANDLE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.9);

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Dark grey panel background (tips box, custom controls)
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Green for an active (wired) tool control
    pub const CTRL_ACTIVE: egui::Color32 = egui::Color32::from_rgb(100, 200, 100);

    /// Dim grey for an inactive (unwired) tool control
    pub const CTRL_INACTIVE: egui::Color32 = egui::Color32::from_rgb(110, 110, 110);

    /// Orange for capacity notices
    pub const NOTICE_TEXT: egui::Color32 = egui::Color32::from_rgb(255, 165, 0);

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;
}
