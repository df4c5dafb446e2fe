//! Shared tool state, lifecycle and the interface every drawing tool implements.

use std::fmt;
use std::str::FromStr;

use bevy::prelude::*;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GeodrawerError;
use crate::geo::{LatLng, LatLngBounds};
use crate::map::{MapSurface, ShapeId};

use super::snapshot::ToolSnapshot;

/// The supported drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolName {
    Point,
    Polyline,
    Polygon,
    Circle,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::Point,
        ToolName::Polyline,
        ToolName::Polygon,
        ToolName::Circle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::Point => "point",
            ToolName::Polyline => "polyline",
            ToolName::Polygon => "polygon",
            ToolName::Circle => "circle",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToolName::Point => "Point",
            ToolName::Polyline => "Polyline",
            ToolName::Polygon => "Polygon",
            ToolName::Circle => "Circle",
        }
    }

    /// Plural noun used in log lines and capacity notices
    pub fn items_noun(&self) -> &'static str {
        match self {
            ToolName::Point => "points",
            ToolName::Polyline => "polylines",
            ToolName::Polygon => "polygons",
            ToolName::Circle => "circles",
        }
    }

    pub fn capacity_notice(&self) -> Notice {
        Notice {
            message: format!("Maximum number of insertable {} reached", self.items_noun()),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = GeodrawerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| GeodrawerError::UnsupportedTool(s.to_string()))
    }
}

/// Per-tool options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolOptions {
    /// Maximum number of shapes the tool may draw, at least one
    #[serde(deserialize_with = "at_least_one")]
    pub max_items_allowed: u32,
}

fn at_least_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u32::deserialize(deserializer)?.max(1))
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            max_items_allowed: 1,
        }
    }
}

/// Control a tool is bound to while it has one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolControl {
    /// Built-in toolbar button
    Default,
    /// Caller-supplied control, by id
    Custom(String),
}

/// Result of a click routed to a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A new shape was started
    Created(ShapeId),
    /// A vertex was appended to the shape being drawn
    Extended(ShapeId),
    /// The shape being sized was completed
    Finalized(ShapeId),
    /// The tool is at its item cap; nothing changed
    Rejected,
}

/// User-facing message, shown once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

/// Parse the leading integer of `input`, ignoring leading whitespace and any trailing text
fn parse_int_prefix(input: &str) -> Option<u32> {
    let trimmed = input.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// State and lifecycle shared by every tool
#[derive(Debug)]
pub struct ToolState {
    tool_name: ToolName,
    active: bool,
    items: Vec<ShapeId>,
    options: ToolOptions,
    next_shape: bool,
    ctrl_param: Option<String>,
    ctrl: Option<ToolControl>,
    selected: bool,
}

impl ToolState {
    pub fn new(tool_name: ToolName, ctrl_param: Option<String>, options: ToolOptions) -> Self {
        Self {
            tool_name,
            active: false,
            items: Vec::new(),
            options,
            next_shape: false,
            ctrl_param,
            ctrl: None,
            selected: false,
        }
    }

    pub fn tool_name(&self) -> ToolName {
        self.tool_name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn items(&self) -> &[ShapeId] {
        &self.items
    }

    pub fn options(&self) -> &ToolOptions {
        &self.options
    }

    pub fn add_item(&mut self, id: ShapeId) {
        self.items.push(id);
    }

    /// Splice an item out of the list, returning its former position
    pub fn remove_item(&mut self, id: ShapeId) -> Option<usize> {
        let index = self.items.iter().position(|item| *item == id)?;
        self.items.remove(index);
        Some(index)
    }

    pub fn take_items(&mut self) -> Vec<ShapeId> {
        std::mem::take(&mut self.items)
    }

    pub fn owns(&self, id: ShapeId) -> bool {
        self.items.contains(&id)
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.options.max_items_allowed as usize
    }

    /// Sets the item cap from user input, keeping only its leading integer.
    /// Returns false (and keeps the current cap) when there is none or it is zero.
    pub fn set_max_items_allowed(&mut self, input: &str) -> bool {
        match parse_int_prefix(input) {
            Some(max) if max > 0 => {
                self.options.max_items_allowed = max;
                true
            }
            _ => false,
        }
    }

    pub fn next_shape(&self) -> bool {
        self.next_shape
    }

    pub fn set_next_shape(&mut self, enable: bool) {
        self.next_shape = enable;
    }

    /// Control id given by the caller, `None` for the built-in one
    pub fn ctrl_param(&self) -> Option<&str> {
        self.ctrl_param.as_deref()
    }

    pub fn ctrl(&self) -> Option<&ToolControl> {
        self.ctrl.as_ref()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Bind the control and mark the tool active
    pub fn activate(&mut self) {
        self.active = true;
        self.ctrl = Some(match &self.ctrl_param {
            Some(id) => ToolControl::Custom(id.clone()),
            None => ToolControl::Default,
        });
        info!("geodrawer: {} tool activated", self.tool_name);
    }

    /// Unwire the tool. Returns true only when it was active.
    ///
    /// With `remove_ctrl` the built-in control is dropped as well; caller-supplied
    /// controls are never removed.
    pub fn deactivate(&mut self, remove_ctrl: bool) -> bool {
        let was_active = self.active;
        self.active = false;
        self.selected = false;

        if remove_ctrl && self.ctrl_param.is_none() {
            self.ctrl = None;
        }

        if was_active {
            info!("geodrawer: {} tool deactivated", self.tool_name);
        } else {
            info!("geodrawer: {} tool already deactivated", self.tool_name);
        }
        was_active
    }
}

/// A stateful handler for one shape kind.
///
/// Tools keep shape ids; geometry lives on the [`MapSurface`].
pub trait DrawingTool: Send + Sync {
    fn state(&self) -> &ToolState;

    fn state_mut(&mut self) -> &mut ToolState;

    fn tips_text(&self) -> &'static str;

    /// Called whenever the tool becomes the drawing tool
    fn prepare_tool(&mut self) {}

    fn click_handler(&mut self, surface: &mut MapSurface, at: LatLng) -> ClickOutcome;

    /// Pointer moved over the map while this tool is drawing.
    /// Returns true if a shape changed.
    fn pointer_moved(&mut self, _surface: &mut MapSurface, _at: LatLng) -> bool {
        false
    }

    /// The tool stops being the drawing tool
    fn release(&mut self) {}

    /// Secondary-input deletion of one of this tool's shapes
    fn delete_item(&mut self, surface: &mut MapSurface, id: ShapeId) -> bool {
        if self.state_mut().remove_item(id).is_none() {
            return false;
        }
        surface.remove(id);
        self.state_mut().set_next_shape(true);
        true
    }

    /// Remove every shape from the map and empty the item list
    fn clear(&mut self, surface: &mut MapSurface) {
        for id in self.state_mut().take_items() {
            surface.remove(id);
        }
        info!("geodrawer: {} cleared", self.state().tool_name().items_noun());
    }

    fn export_data(&self, surface: &MapSurface) -> ToolSnapshot;

    /// Rebuild shapes by replaying the clicks that would have produced them.
    /// Returns how many replayed shapes were rejected by the item cap.
    fn import_data(
        &mut self,
        surface: &mut MapSurface,
        data: &ToolSnapshot,
    ) -> Result<usize, GeodrawerError>;

    /// Grow `bounds` to cover every shape of this tool
    fn extend_bounds(&self, surface: &MapSurface, bounds: &mut LatLngBounds) {
        for id in self.state().items() {
            if let Some(shape) = surface.get(*id) {
                bounds.union(&shape.bounds());
            }
        }
    }
}
