use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::ControlSetting;
use crate::drawing::{
    ClearMapRequest, ExportMapRequest, FitShapesRequest, GeocodeRequest, GeocoderState,
    MapControl, MapController, ToolControl, ToolName,
};
use crate::theme;

use super::export_window::ExportDialogState;
use super::geocoder_field::geocoder_field;
use super::help::HelpWindowState;
use super::settings_dialog::SettingsDialogState;

/// Built-in button for a tool bound to the default control
struct ToolButton {
    name: ToolName,
    active: bool,
    selected: bool,
}

fn tool_button_label(name: ToolName) -> String {
    let key = match name {
        ToolName::Point => "P",
        ToolName::Polyline => "L",
        ToolName::Polygon => "G",
        ToolName::Circle => "C",
    };
    format!("{} ({})", name.display_name(), key)
}

/// Main toolbar: built-in tool buttons, map controls and the geocoder field
#[allow(clippy::too_many_arguments)]
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut controller: ResMut<MapController>,
    mut geocoder: ResMut<GeocoderState>,
    mut export_dialog: ResMut<ExportDialogState>,
    mut settings: ResMut<SettingsDialogState>,
    mut help: ResMut<HelpWindowState>,
    mut clear_events: MessageWriter<ClearMapRequest>,
    mut export_events: MessageWriter<ExportMapRequest>,
    mut fit_events: MessageWriter<FitShapesRequest>,
    mut geocode_events: MessageWriter<GeocodeRequest>,
) -> Result {
    let buttons: Vec<ToolButton> = controller
        .tools()
        .filter(|tool| tool.state().ctrl() == Some(&ToolControl::Default))
        .map(|tool| ToolButton {
            name: tool.state().tool_name(),
            active: tool.state().is_active(),
            selected: tool.state().is_selected(),
        })
        .collect();
    let show_clear = *controller.control(MapControl::ClearMap) == ControlSetting::Default;
    let show_export = *controller.control(MapControl::ExportMap) == ControlSetting::Default;
    let show_geocoder = controller.geocoder_enabled();

    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                for button in &buttons {
                    let widget = egui::Button::new(
                        egui::RichText::new(tool_button_label(button.name))
                            .size(14.0)
                            .strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(button.selected);

                    let response = ui.add_enabled(button.active, widget);
                    if response.clicked() {
                        controller.set_drawing(button.name);
                    }
                    response.on_hover_text(format!("Draw {}", button.name.items_noun()));
                }

                if !buttons.is_empty() {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                }

                if show_clear && ui.button("Clear map").clicked() {
                    clear_events.write(ClearMapRequest);
                }
                if show_export
                    && ui
                        .button("Export map")
                        .on_hover_text("Ctrl+E")
                        .clicked()
                {
                    export_events.write(ExportMapRequest);
                }
                if ui.button("Import...").clicked() {
                    export_dialog.request_import = true;
                }
                if ui.button("Fit").on_hover_text("F").clicked() {
                    fit_events.write(FitShapesRequest);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Help (F1)").clicked() {
                        help.is_open = true;
                    }
                    if ui.button("Settings").clicked() {
                        settings.open(&controller);
                    }
                });
            });

            if show_geocoder {
                ui.add_space(4.0);
                geocoder_field(ui, &mut geocoder, &mut geocode_events);
            }
        });
    Ok(())
}

/// Tips box in the bottom-left corner of the map, for the built-in tips control
pub fn tips_ui(mut contexts: EguiContexts, controller: Res<MapController>) -> Result {
    if *controller.control(MapControl::Tips) != ControlSetting::Default {
        return Ok(());
    }
    let Some(tips) = controller.tips() else {
        return Ok(());
    };

    egui::Area::new(egui::Id::new("tips_box"))
        .anchor(egui::Align2::LEFT_BOTTOM, [12.0, -12.0])
        .interactable(false)
        .show(contexts.ctx_mut()?, |ui| {
            egui::Frame::new()
                .fill(theme::ui::PANEL_BACKGROUND)
                .corner_radius(4.0)
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.set_max_width(320.0);
                    ui.label(egui::RichText::new(tips).color(theme::ui::LABEL_TEXT));
                });
        });
    Ok(())
}
