//! The map controller: tool registry, the single drawing tool and the built-in controls.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::config::{ControlSetting, CustomControl, ExportTarget, MapOptions, ToolConfig};
use crate::error::GeodrawerError;
use crate::geo::{LatLng, LatLngBounds};
use crate::map::{MapSurface, ShapeId};

use super::circle_tool::CircleTool;
use super::point_tool::PointTool;
use super::polygon_tool::PolygonTool;
use super::polyline_tool::PolylineTool;
use super::snapshot::MapSnapshot;
use super::tool::{ClickOutcome, DrawingTool, Notice, ToolName, ToolOptions};

/// Built-in map controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapControl {
    ClearMap,
    ExportMap,
    Tips,
}

impl MapControl {
    pub fn as_str(&self) -> &'static str {
        match self {
            MapControl::ClearMap => "clear map",
            MapControl::ExportMap => "export map",
            MapControl::Tips => "tips",
        }
    }
}

/// What a custom control does when used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlBinding {
    Tool(ToolName),
    Map(MapControl),
}

/// Create the tool for `name`
fn make_tool(name: ToolName, ctrl: Option<String>, options: ToolOptions) -> Box<dyn DrawingTool> {
    match name {
        ToolName::Point => Box::new(PointTool::new(ctrl, options)),
        ToolName::Polyline => Box::new(PolylineTool::new(ctrl, options)),
        ToolName::Polygon => Box::new(PolygonTool::new(ctrl, options)),
        ToolName::Circle => Box::new(CircleTool::new(ctrl, options)),
    }
}

#[derive(Resource)]
pub struct MapController {
    tools: BTreeMap<ToolName, Box<dyn DrawingTool>>,
    drawing_tool: Option<ToolName>,
    tips: Option<String>,
    clear_map_ctrl: ControlSetting,
    export_map_ctrl: ControlSetting,
    tips_map_ctrl: ControlSetting,
    geocoder_enabled: bool,
    export_target: ExportTarget,
    custom_controls: Vec<CustomControl>,
    notices: Vec<Notice>,
}

impl Default for MapController {
    fn default() -> Self {
        Self {
            tools: BTreeMap::new(),
            drawing_tool: None,
            tips: None,
            clear_map_ctrl: ControlSetting::Default,
            export_map_ctrl: ControlSetting::Default,
            tips_map_ctrl: ControlSetting::Default,
            geocoder_enabled: true,
            export_target: ExportTarget::Window,
            custom_controls: Vec::new(),
            notices: Vec::new(),
        }
    }
}

impl MapController {
    /// Build the controller and its tools, failing on unsupported tool kinds and
    /// on controls that resolve to nothing
    pub fn from_options(options: &MapOptions) -> Result<Self, GeodrawerError> {
        let mut controller = Self {
            clear_map_ctrl: options.clear_map_ctrl.clone(),
            export_map_ctrl: options.export_map_ctrl.clone(),
            tips_map_ctrl: options.tips_map_ctrl.clone(),
            geocoder_enabled: options.geocoder_map_field,
            export_target: options.export_map_callback,
            custom_controls: options.custom_controls.clone(),
            ..Default::default()
        };

        for (control, setting) in [
            (MapControl::ClearMap, &options.clear_map_ctrl),
            (MapControl::ExportMap, &options.export_map_ctrl),
            (MapControl::Tips, &options.tips_map_ctrl),
        ] {
            if let Some(id) = setting.custom_id()
                && !controller.has_custom_control(id)
            {
                return Err(GeodrawerError::ControlNotFound {
                    control: control.as_str().to_string(),
                });
            }
        }

        for (name, config) in &options.tools {
            controller.add_tool_named(name, config)?;
        }

        info!(
            "geodrawer: map controller ready with {} tool(s)",
            controller.tools.len()
        );
        Ok(controller)
    }

    fn has_custom_control(&self, id: &str) -> bool {
        self.custom_controls.iter().any(|control| control.id == id)
    }

    /// Register and activate a tool. A tool already registered under the same
    /// name is deactivated and handed back so its shapes can be cleared.
    pub fn add_tool(
        &mut self,
        mut tool: Box<dyn DrawingTool>,
    ) -> Result<Option<Box<dyn DrawingTool>>, GeodrawerError> {
        let name = tool.state().tool_name();
        if let Some(id) = tool.state().ctrl_param()
            && !self.has_custom_control(id)
        {
            return Err(GeodrawerError::ControllerNotFound { tool: name });
        }

        let replaced = self.tools.remove(&name).map(|mut old| {
            if self.drawing_tool == Some(name) {
                self.drawing_tool = None;
                old.release();
            }
            old.state_mut().deactivate(true);
            old
        });

        tool.state_mut().activate();
        self.tools.insert(name, tool);
        Ok(replaced)
    }

    /// Add a tool by name, as written in the map options
    pub fn add_tool_named(
        &mut self,
        name: &str,
        config: &ToolConfig,
    ) -> Result<Option<Box<dyn DrawingTool>>, GeodrawerError> {
        let name: ToolName = name.parse()?;
        self.add_tool(make_tool(name, config.ctrl.clone(), config.options))
    }

    /// Deactivate a tool, drop its built-in control and take its shapes off the map
    pub fn remove_tool(
        &mut self,
        name: ToolName,
        surface: &mut MapSurface,
    ) -> Option<Box<dyn DrawingTool>> {
        self.deactivate_tool(name, true);
        let mut tool = self.tools.remove(&name)?;
        tool.clear(surface);
        Some(tool)
    }

    pub fn tool(&self, name: ToolName) -> Option<&dyn DrawingTool> {
        self.tools.get(&name).map(|tool| tool.as_ref())
    }

    pub fn tools(&self) -> impl Iterator<Item = &dyn DrawingTool> {
        self.tools.values().map(|tool| tool.as_ref())
    }

    /// Rewire a tool's control so it can start drawing again
    pub fn activate_tool(&mut self, name: ToolName) -> bool {
        match self.tools.get_mut(&name) {
            Some(tool) => {
                tool.state_mut().activate();
                true
            }
            None => false,
        }
    }

    /// Deactivate a tool. Returns true only if it was active, so repeated calls
    /// change nothing.
    pub fn deactivate_tool(&mut self, name: ToolName, remove_ctrl: bool) -> bool {
        let Some(tool) = self.tools.get_mut(&name) else {
            return false;
        };
        let changed = tool.state_mut().deactivate(remove_ctrl);
        if changed && self.drawing_tool == Some(name) {
            tool.release();
            self.drawing_tool = None;
        }
        changed
    }

    /// Make a tool the drawing tool, as clicking its control does.
    /// Inactive tools ignore the request.
    pub fn set_drawing(&mut self, name: ToolName) -> bool {
        let tips = match self.tools.get_mut(&name) {
            Some(tool) if tool.state().is_active() => {
                tool.prepare_tool();
                tool.tips_text()
            }
            _ => return false,
        };
        self.update_tips(tips);
        info!("geodrawer: drawing tool: {}", name);
        self.set_drawing_tool(Some(name));
        true
    }

    /// Swap the drawing tool. The previous one stops drawing and is unselected.
    pub fn set_drawing_tool(&mut self, name: Option<ToolName>) {
        if let Some(previous) = self.drawing_tool
            && Some(previous) != name
            && let Some(tool) = self.tools.get_mut(&previous)
        {
            tool.release();
            tool.state_mut().set_selected(false);
        }

        self.drawing_tool = name.filter(|name| self.tools.contains_key(name));
        if let Some(tool) = self.drawing_tool.and_then(|name| self.tools.get_mut(&name)) {
            tool.state_mut().set_selected(true);
        }
    }

    pub fn drawing_tool(&self) -> Option<ToolName> {
        self.drawing_tool
    }

    pub fn update_tips(&mut self, text: &str) {
        if self.tips_map_ctrl.is_enabled() {
            self.tips = Some(text.to_string());
        }
    }

    pub fn tips(&self) -> Option<&str> {
        self.tips.as_deref()
    }

    /// Route a primary click on the map to the drawing tool
    pub fn click(&mut self, surface: &mut MapSurface, at: LatLng) -> Option<ClickOutcome> {
        let name = self.drawing_tool?;
        let tool = self.tools.get_mut(&name)?;
        let outcome = tool.click_handler(surface, at);
        if outcome == ClickOutcome::Rejected {
            self.notices.push(name.capacity_notice());
        }
        Some(outcome)
    }

    /// Secondary click: delete the topmost shape under the pointer, whichever tool drew it
    pub fn secondary_click(
        &mut self,
        surface: &mut MapSurface,
        world: Vec2,
        tolerance: f32,
    ) -> Option<(ToolName, ShapeId)> {
        let id = surface.shape_at(world, tolerance)?;
        let name = self.owner_of(id)?;
        let tool = self.tools.get_mut(&name)?;
        tool.delete_item(surface, id).then(|| {
            info!("geodrawer: {} shape deleted", name);
            (name, id)
        })
    }

    pub fn pointer_moved(&mut self, surface: &mut MapSurface, at: LatLng) -> bool {
        self.drawing_tool
            .and_then(|name| self.tools.get_mut(&name))
            .is_some_and(|tool| tool.pointer_moved(surface, at))
    }

    pub fn owner_of(&self, id: ShapeId) -> Option<ToolName> {
        self.tools
            .iter()
            .find(|(_, tool)| tool.state().owns(id))
            .map(|(name, _)| *name)
    }

    /// Remove every tool's shapes. The drawing tool stays selected and starts a new shape.
    pub fn clear_map(&mut self, surface: &mut MapSurface) {
        for tool in self.tools.values_mut() {
            tool.clear(surface);
        }
        if let Some(tool) = self.drawing_tool.and_then(|name| self.tools.get_mut(&name)) {
            tool.prepare_tool();
        }
        info!("geodrawer: map cleared");
    }

    pub fn export_map(&self, surface: &MapSurface) -> MapSnapshot {
        let mut snapshot = MapSnapshot::default();
        for (name, tool) in &self.tools {
            if let Err(e) = snapshot.insert(*name, tool.export_data(surface)) {
                error!("geodrawer: failed to export {} shapes: {}", name, e);
            }
        }
        snapshot
    }

    /// Replay a snapshot into the registered tools. Data for tools that are not
    /// registered is skipped. Returns how many shapes the item caps rejected.
    pub fn import_map(
        &mut self,
        surface: &mut MapSurface,
        snapshot: &MapSnapshot,
    ) -> Result<usize, GeodrawerError> {
        let mut rejected = 0;
        for name in snapshot.tools() {
            let Some(data) = snapshot.get(name) else {
                continue;
            };
            match self.tools.get_mut(&name) {
                Some(tool) => rejected += tool.import_data(surface, &data)?,
                None => warn!("geodrawer: no {} tool, skipping imported data", name),
            }
        }
        if rejected > 0 {
            self.notices.push(Notice {
                message: format!("{rejected} imported shape(s) exceeded the tools' maximum"),
            });
        }
        info!("geodrawer: map imported");
        Ok(rejected)
    }

    /// Region covering every shape of every tool
    pub fn extend_bounds(&self, surface: &MapSurface) -> LatLngBounds {
        let mut bounds = LatLngBounds::new();
        for tool in self.tools.values() {
            tool.extend_bounds(surface, &mut bounds);
        }
        bounds
    }

    pub fn set_max_items_allowed(&mut self, name: ToolName, input: &str) -> bool {
        self.tools
            .get_mut(&name)
            .is_some_and(|tool| tool.state_mut().set_max_items_allowed(input))
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn control(&self, control: MapControl) -> &ControlSetting {
        match control {
            MapControl::ClearMap => &self.clear_map_ctrl,
            MapControl::ExportMap => &self.export_map_ctrl,
            MapControl::Tips => &self.tips_map_ctrl,
        }
    }

    pub fn geocoder_enabled(&self) -> bool {
        self.geocoder_enabled
    }

    pub fn export_target(&self) -> ExportTarget {
        self.export_target
    }

    pub fn custom_controls(&self) -> &[CustomControl] {
        &self.custom_controls
    }

    /// What the custom control `id` is wired to, if anything
    pub fn control_binding(&self, id: &str) -> Option<ControlBinding> {
        let tool = self
            .tools
            .iter()
            .find(|(_, tool)| tool.state().is_active() && tool.state().ctrl_param() == Some(id))
            .map(|(name, _)| ControlBinding::Tool(*name));

        tool.or_else(|| {
            [MapControl::ClearMap, MapControl::ExportMap, MapControl::Tips]
                .into_iter()
                .find(|control| self.control(*control).custom_id() == Some(id))
                .map(ControlBinding::Map)
        })
    }
}
