//! Panel holding the caller-supplied controls named in the map options.
//!
//! A custom control does whatever it is wired to: start a tool, clear or
//! export the map, or host the tips text. Unwired controls render disabled.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::drawing::{ClearMapRequest, ControlBinding, ExportMapRequest, MapControl, MapController};
use crate::theme;

pub fn custom_controls_ui(
    mut contexts: EguiContexts,
    mut controller: ResMut<MapController>,
    mut clear_events: MessageWriter<ClearMapRequest>,
    mut export_events: MessageWriter<ExportMapRequest>,
) -> Result {
    if controller.custom_controls().is_empty() {
        return Ok(());
    }

    let controls: Vec<_> = controller
        .custom_controls()
        .iter()
        .map(|control| {
            (
                control.label.clone(),
                controller.control_binding(&control.id),
            )
        })
        .collect();
    let tips = controller.tips().map(str::to_string);

    egui::SidePanel::right("custom_controls")
        .resizable(false)
        .default_width(200.0)
        .show(contexts.ctx_mut()?, |ui| {
            ui.add_space(8.0);
            ui.label(egui::RichText::new("Controls").strong());
            ui.separator();

            for (label, binding) in controls {
                match binding {
                    Some(ControlBinding::Tool(name)) => {
                        let selected = controller
                            .tool(name)
                            .is_some_and(|tool| tool.state().is_selected());
                        let text = egui::RichText::new(&label).color(theme::ui::CTRL_ACTIVE);
                        if ui
                            .add(egui::Button::new(text).selected(selected))
                            .clicked()
                        {
                            controller.set_drawing(name);
                        }
                    }
                    Some(ControlBinding::Map(MapControl::ClearMap)) => {
                        if ui.button(&label).clicked() {
                            clear_events.write(ClearMapRequest);
                        }
                    }
                    Some(ControlBinding::Map(MapControl::ExportMap)) => {
                        if ui.button(&label).clicked() {
                            export_events.write(ExportMapRequest);
                        }
                    }
                    Some(ControlBinding::Map(MapControl::Tips)) => {
                        ui.group(|ui| {
                            ui.label(egui::RichText::new(&label).strong());
                            if let Some(tips) = &tips {
                                ui.label(egui::RichText::new(tips).color(theme::ui::LABEL_TEXT));
                            }
                        });
                    }
                    None => {
                        ui.add_enabled(
                            false,
                            egui::Button::new(
                                egui::RichText::new(&label).color(theme::ui::CTRL_INACTIVE),
                            ),
                        )
                        .on_disabled_hover_text("Not wired to an active tool");
                    }
                }
                ui.add_space(4.0);
            }
        });
    Ok(())
}
