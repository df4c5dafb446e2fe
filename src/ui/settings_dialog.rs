use std::collections::BTreeMap;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, ToolConfig, UpdateToolOptionsRequest};
use crate::drawing::{MapController, ToolName};
use crate::map::MapSurface;
use crate::theme;

/// State for the settings dialog
#[derive(Resource, Default)]
pub struct SettingsDialogState {
    /// Whether the dialog is open
    pub is_open: bool,
    /// Edited item caps, as typed
    pub max_items: BTreeMap<ToolName, String>,
    /// Whether each tool should be wired to its control
    pub enabled: BTreeMap<ToolName, bool>,
    /// Tool picked in the "Add tool" box
    pub add_choice: Option<ToolName>,
    /// Inputs that could not be applied on the last save
    pub errors: Vec<String>,
}

impl SettingsDialogState {
    /// Open the dialog with the tools' current caps
    pub fn open(&mut self, controller: &MapController) {
        self.max_items.clear();
        self.enabled.clear();
        for tool in controller.tools() {
            self.track(
                tool.state().tool_name(),
                tool.state().options().max_items_allowed,
                tool.state().is_active(),
            );
        }
        self.add_choice = None;
        self.errors.clear();
        self.is_open = true;
    }

    fn track(&mut self, name: ToolName, max_items_allowed: u32, active: bool) {
        self.max_items.insert(name, max_items_allowed.to_string());
        self.enabled.insert(name, active);
    }

    fn untrack(&mut self, name: ToolName) {
        self.max_items.remove(&name);
        self.enabled.remove(&name);
    }

    /// Supported tools the controller does not have
    pub fn missing_tools(controller: &MapController) -> Vec<ToolName> {
        ToolName::ALL
            .into_iter()
            .filter(|name| controller.tool(*name).is_none())
            .collect()
    }

    /// Apply every edited cap and enable flag. Returns the caps that changed.
    /// Inputs without a positive leading integer are reported and leave their
    /// tool unchanged.
    fn apply(&mut self, controller: &mut MapController) -> Vec<(ToolName, u32)> {
        self.errors.clear();
        let mut changed = Vec::new();

        for (name, input) in &self.max_items {
            let Some(current) = controller
                .tool(*name)
                .map(|tool| tool.state().options().max_items_allowed)
            else {
                continue;
            };
            if input.trim() == current.to_string() {
                continue;
            }

            if controller.set_max_items_allowed(*name, input) {
                if let Some(tool) = controller.tool(*name) {
                    changed.push((*name, tool.state().options().max_items_allowed));
                }
            } else {
                self.errors.push(format!(
                    "\"{}\" is not a valid maximum for {}",
                    input,
                    name.items_noun()
                ));
            }
        }

        for (name, enabled) in &self.enabled {
            let Some(active) = controller.tool(*name).map(|tool| tool.state().is_active()) else {
                continue;
            };
            match (*enabled, active) {
                (true, false) => {
                    controller.activate_tool(*name);
                }
                (false, true) => {
                    controller.deactivate_tool(*name, true);
                }
                _ => {}
            }
        }

        changed
    }

    /// Unregister a tool and take its shapes off the map
    fn remove(&mut self, controller: &mut MapController, surface: &mut MapSurface, name: ToolName) {
        if controller.remove_tool(name, surface).is_some() {
            info!("Removed the {} tool", name);
        }
        self.untrack(name);
    }

    /// Register a tool with default options
    fn add(&mut self, controller: &mut MapController, name: ToolName) {
        match controller.add_tool_named(name.as_str(), &ToolConfig::default()) {
            Ok(_) => {
                if let Some(tool) = controller.tool(name) {
                    self.track(
                        name,
                        tool.state().options().max_items_allowed,
                        tool.state().is_active(),
                    );
                }
            }
            Err(e) => self.errors.push(e.to_string()),
        }
    }
}

/// Renders the settings dialog
pub fn settings_dialog_ui(
    mut contexts: EguiContexts,
    mut dialog_state: ResMut<SettingsDialogState>,
    mut controller: ResMut<MapController>,
    mut surface: ResMut<MapSurface>,
    config: Res<AppConfig>,
    mut option_events: MessageWriter<UpdateToolOptionsRequest>,
) -> Result {
    if !dialog_state.is_open {
        return Ok(());
    }

    let mut should_close = false;
    let mut should_save = false;
    let mut to_remove = None;
    let mut to_add = None;
    let missing = SettingsDialogState::missing_tools(&controller);

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(false)
        .min_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.group(|ui| {
                ui.label(egui::RichText::new("Tools").strong());
                ui.add_space(8.0);

                if dialog_state.max_items.is_empty() {
                    ui.label(egui::RichText::new("No tools configured").weak().italics());
                }

                let state = &mut *dialog_state;
                egui::Grid::new("tools_grid")
                    .num_columns(4)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        ui.strong("Tool");
                        ui.strong("Maximum");
                        ui.strong("Enabled");
                        ui.end_row();

                        for (name, input) in state.max_items.iter_mut() {
                            ui.label(name.display_name());
                            ui.add(egui::TextEdit::singleline(input).desired_width(80.0));
                            if let Some(enabled) = state.enabled.get_mut(name) {
                                ui.checkbox(enabled, "");
                            }
                            if ui
                                .small_button("Remove")
                                .on_hover_text("Remove the tool and its shapes")
                                .clicked()
                            {
                                to_remove = Some(*name);
                            }
                            ui.end_row();
                        }
                    });

                if !missing.is_empty() {
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        let selected = state.add_choice.filter(|name| missing.contains(name));
                        egui::ComboBox::from_id_salt("add_tool_choice")
                            .selected_text(selected.map_or("Choose a tool", |name| name.display_name()))
                            .show_ui(ui, |ui| {
                                for name in &missing {
                                    ui.selectable_value(
                                        &mut state.add_choice,
                                        Some(*name),
                                        name.display_name(),
                                    );
                                }
                            });
                        if ui
                            .add_enabled(selected.is_some(), egui::Button::new("Add tool"))
                            .clicked()
                        {
                            to_add = selected;
                        }
                    });
                }
            });

            for error in &dialog_state.errors {
                ui.colored_label(theme::ui::ERROR_TEXT, error);
            }

            ui.add_space(12.0);

            ui.group(|ui| {
                ui.label(egui::RichText::new("Configuration File").strong());
                ui.add_space(8.0);
                ui.label(egui::RichText::new(config.config_path.to_string_lossy()).weak());
                ui.label(
                    egui::RichText::new(
                        "Tools, controls and the initial view are read from this file at startup.",
                    )
                    .color(theme::ui::HINT_TEXT)
                    .small(),
                );
            });

            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    should_save = true;
                }
                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
            });
        });

    if let Some(name) = to_remove {
        dialog_state.remove(&mut controller, &mut surface, name);
    }
    if let Some(name) = to_add {
        dialog_state.add(&mut controller, name);
        dialog_state.add_choice = None;
    }

    if should_save {
        for (tool, max_items_allowed) in dialog_state.apply(&mut controller) {
            option_events.write(UpdateToolOptionsRequest {
                tool,
                max_items_allowed,
            });
        }
        should_close = dialog_state.errors.is_empty();
    }

    if should_close {
        dialog_state.is_open = false;
        dialog_state.errors.clear();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapOptions;
    use crate::drawing::ToolControl;
    use crate::geo::LatLng;

    fn default_controller() -> MapController {
        MapController::from_options(&MapOptions::default()).unwrap()
    }

    #[test]
    fn test_open_loads_caps_and_enabled_flags() {
        let controller = default_controller();
        let mut state = SettingsDialogState::default();
        state.open(&controller);

        assert!(state.is_open);
        assert_eq!(state.max_items.len(), 4);
        assert_eq!(state.max_items[&ToolName::Circle], "1");
        assert!(state.enabled.values().all(|enabled| *enabled));
    }

    #[test]
    fn test_disabling_a_tool_drops_its_button() {
        let mut controller = default_controller();
        controller.set_drawing(ToolName::Point);

        let mut state = SettingsDialogState::default();
        state.open(&controller);
        state.enabled.insert(ToolName::Point, false);
        state.apply(&mut controller);

        let point = controller.tool(ToolName::Point).unwrap();
        assert!(!point.state().is_active());
        assert_eq!(point.state().ctrl(), None);
        assert_eq!(controller.drawing_tool(), None);

        state.enabled.insert(ToolName::Point, true);
        state.apply(&mut controller);
        let point = controller.tool(ToolName::Point).unwrap();
        assert!(point.state().is_active());
        assert_eq!(point.state().ctrl(), Some(&ToolControl::Default));
        assert!(controller.set_drawing(ToolName::Point));
    }

    #[test]
    fn test_apply_reports_changed_caps() {
        let mut controller = default_controller();
        let mut state = SettingsDialogState::default();
        state.open(&controller);
        state.max_items.insert(ToolName::Polygon, "5".to_string());

        assert_eq!(state.apply(&mut controller), vec![(ToolName::Polygon, 5)]);
        assert!(state.errors.is_empty());
        // Unchanged inputs are not reported again
        assert!(state.apply(&mut controller).is_empty());
    }

    #[test]
    fn test_zero_cap_is_an_error() {
        let mut controller = default_controller();
        let mut state = SettingsDialogState::default();
        state.open(&controller);
        state.max_items.insert(ToolName::Point, "0".to_string());

        assert!(state.apply(&mut controller).is_empty());
        assert_eq!(state.errors.len(), 1);
        assert_eq!(
            controller
                .tool(ToolName::Point)
                .unwrap()
                .state()
                .options()
                .max_items_allowed,
            1
        );
    }

    #[test]
    fn test_remove_then_add_tool() {
        let mut controller = default_controller();
        let mut surface = MapSurface::default();
        controller.set_drawing(ToolName::Point);
        controller.click(&mut surface, LatLng::new(45.0, 7.0));

        let mut state = SettingsDialogState::default();
        state.open(&controller);
        state.remove(&mut controller, &mut surface, ToolName::Point);

        assert!(surface.is_empty());
        assert!(controller.tool(ToolName::Point).is_none());
        assert!(!state.max_items.contains_key(&ToolName::Point));
        assert_eq!(
            SettingsDialogState::missing_tools(&controller),
            vec![ToolName::Point]
        );

        state.add(&mut controller, ToolName::Point);
        assert!(state.errors.is_empty());
        assert!(controller.tool(ToolName::Point).unwrap().state().is_active());
        assert_eq!(state.enabled.get(&ToolName::Point), Some(&true));
        assert!(SettingsDialogState::missing_tools(&controller).is_empty());
    }
}
